use super::*;

fn solid(w: u32, h: u32, v: u8) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba([v, v, v, 255]))
}

fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 90, 255])
    })
}

#[test]
fn shrink_target_is_min_width_and_min_height() {
    let images = vec![solid(100, 100, 1), solid(120, 140, 2), solid(90, 100, 3)];
    let target = compute_target(&images, Normalization::ShrinkToMin).unwrap();
    assert_eq!(target.canvas, Canvas::new(90, 100).unwrap());

    let (_, out) = normalize_images(images, Normalization::ShrinkToMin).unwrap();
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|img| img.dimensions() == (90, 100)));
}

#[test]
fn pad_target_is_max_width_and_max_height() {
    let images = vec![solid(100, 100, 1), solid(120, 90, 2), solid(90, 140, 3)];
    let target = compute_target(&images, Normalization::PadToMaxBlur).unwrap();
    assert_eq!(target.canvas, Canvas::new(120, 140).unwrap());
}

#[test]
fn empty_input_is_rejected() {
    for strategy in [Normalization::ShrinkToMin, Normalization::PadToMaxBlur] {
        assert!(matches!(
            normalize_images(Vec::new(), strategy).unwrap_err(),
            FlowError::EmptyInput
        ));
    }
}

#[test]
fn uniform_sets_come_back_unchanged() {
    for strategy in [Normalization::ShrinkToMin, Normalization::PadToMaxBlur] {
        let images = vec![gradient(16, 9), gradient(16, 9), solid(16, 9, 40)];
        let (target, out) = normalize_images(images.clone(), strategy).unwrap();
        assert_eq!(target.canvas, Canvas::new(16, 9).unwrap());
        assert_eq!(out, images, "{strategy:?}");
    }
}

#[test]
fn single_image_short_circuits() {
    let img = gradient(33, 17);
    let (target, out) = normalize_images(vec![img.clone()], Normalization::PadToMaxBlur).unwrap();
    assert_eq!(target.canvas, Canvas::of(&img));
    assert_eq!(out, vec![img]);
}

#[test]
fn order_is_preserved() {
    let images = vec![solid(20, 20, 10), solid(30, 25, 200), solid(22, 40, 90)];
    let (_, out) = normalize_images(images, Normalization::ShrinkToMin).unwrap();
    let firsts: Vec<u8> = out.iter().map(|img| img.get_pixel(5, 5).0[0]).collect();
    assert_eq!(firsts, vec![10, 200, 90]);
}

#[test]
fn normalization_parses_names() {
    assert_eq!(
        "pad".parse::<Normalization>().unwrap(),
        Normalization::PadToMaxBlur
    );
    assert_eq!(
        "shrink_to_min".parse::<Normalization>().unwrap(),
        Normalization::ShrinkToMin
    );
    assert!("stretch".parse::<Normalization>().is_err());
}
