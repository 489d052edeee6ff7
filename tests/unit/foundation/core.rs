use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(
        Canvas::new(90, 100).unwrap(),
        Canvas {
            width: 90,
            height: 100
        }
    );
}

#[test]
fn canvas_of_and_matches_follow_image_dimensions() {
    let img = image::RgbaImage::new(12, 7);
    let canvas = Canvas::of(&img);
    assert_eq!(canvas.to_string(), "12x7");
    assert!(canvas.matches(&img));
    assert!(!Canvas::new(7, 12).unwrap().matches(&img));
    assert_eq!(canvas.rgba8_len().unwrap(), 12 * 7 * 4);
}
