use super::*;

fn img(w: u32, h: u32) -> RgbaImage {
    RgbaImage::new(w, h)
}

#[test]
fn first_frame_fixes_canvas() {
    let mut seq = FrameSequence::new(img(4, 3), 2000).unwrap();
    assert_eq!(seq.canvas(), Canvas::new(4, 3).unwrap());
    seq.push(img(4, 3), 40).unwrap();
    assert_eq!(seq.len(), 2);
    assert!(!seq.is_empty());
    assert_eq!(seq.durations(), vec![2000, 40]);
    assert_eq!(seq.total_duration_ms(), 2040);
}

#[test]
fn push_rejects_other_sizes_and_zero_duration() {
    let mut seq = FrameSequence::new(img(4, 3), 2000).unwrap();
    assert!(seq.push(img(3, 4), 40).is_err());
    assert!(seq.push(img(4, 3), 0).is_err());
    assert_eq!(seq.len(), 1);
    assert!(FrameSequence::new(img(4, 3), 0).is_err());
    assert!(FrameSequence::new(img(0, 3), 10).is_err());
}

#[test]
fn from_frames_requires_at_least_one() {
    assert!(matches!(
        FrameSequence::from_frames(Vec::new()).unwrap_err(),
        FlowError::EmptyInput
    ));

    let seq = FrameSequence::from_frames(vec![
        SequenceFrame {
            image: img(2, 2),
            duration_ms: 5,
        },
        SequenceFrame {
            image: img(2, 2),
            duration_ms: 7,
        },
    ])
    .unwrap();
    assert_eq!(seq.durations(), vec![5, 7]);
    assert_eq!(seq.into_frames().len(), 2);
}
