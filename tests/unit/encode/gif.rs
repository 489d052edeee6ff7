use std::path::PathBuf;

use super::*;
use crate::encode::sink::encode_sequence;
use crate::sequence::frames::FrameSequence;

fn out_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_gif").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn frame(rgb: [u8; 3], duration_ms: u32) -> SequenceFrame {
    SequenceFrame {
        image: image::RgbaImage::from_pixel(8, 6, image::Rgba([rgb[0], rgb[1], rgb[2], 255])),
        duration_ms,
    }
}

struct Decoded {
    width: u16,
    height: u16,
    repeat: ::gif::Repeat,
    delays: Vec<u16>,
    disposals: Vec<::gif::DisposalMethod>,
    first_pixels: Vec<[u8; 4]>,
}

fn decode(path: &Path) -> Decoded {
    let mut opts = ::gif::DecodeOptions::new();
    opts.set_color_output(::gif::ColorOutput::RGBA);
    let mut dec = opts.read_info(File::open(path).unwrap()).unwrap();
    let (width, height) = (dec.width(), dec.height());
    let mut delays = Vec::new();
    let mut disposals = Vec::new();
    let mut first_pixels = Vec::new();
    while let Some(f) = dec.read_next_frame().unwrap() {
        delays.push(f.delay);
        disposals.push(f.dispose);
        first_pixels.push([f.buffer[0], f.buffer[1], f.buffer[2], f.buffer[3]]);
    }
    Decoded {
        width,
        height,
        repeat: dec.repeat(),
        delays,
        disposals,
        first_pixels,
    }
}

#[test]
fn delay_is_rounded_to_centiseconds() {
    assert_eq!(delay_centis(2000), 200);
    assert_eq!(delay_centis(40), 4);
    assert_eq!(delay_centis(44), 4);
    assert_eq!(delay_centis(45), 5);
    assert_eq!(delay_centis(1), 1);
    assert_eq!(delay_centis(u32::MAX), u16::MAX);
}

#[test]
fn writes_looping_gif_with_delays_and_background_disposal() {
    let dir = out_dir("loop");
    let out = dir.join("flow.gif");
    let seq = FrameSequence::from_frames(vec![
        frame([255, 0, 0], 2000),
        frame([128, 0, 128], 40),
        frame([0, 0, 255], 2000),
    ])
    .unwrap();

    let mut sink = GifSink::new(GifSinkOpts::new(&out));
    encode_sequence(&seq, &mut sink).unwrap();

    assert!(out.is_file());
    assert!(!partial_path_for(&out).exists());

    let d = decode(&out);
    assert_eq!((d.width, d.height), (8, 6));
    assert_eq!(d.repeat, ::gif::Repeat::Infinite);
    assert_eq!(d.delays, vec![200, 4, 200]);
    assert!(
        d.disposals
            .iter()
            .all(|m| *m == ::gif::DisposalMethod::Background)
    );
    assert_eq!(d.first_pixels.len(), 3);
    assert!(d.first_pixels[0][0] > 200 && d.first_pixels[0][2] < 50);
    assert!(d.first_pixels[2][2] > 200 && d.first_pixels[2][0] < 50);
}

#[test]
fn failed_encode_leaves_no_artifact() {
    let dir = out_dir("failure");
    let out = dir.join("flow.gif");
    {
        let mut sink = GifSink::new(GifSinkOpts::new(&out));
        sink.begin(SinkConfig {
            width: 8,
            height: 6,
            frame_count: 2,
        })
        .unwrap();
        sink.push_frame(&frame([1, 2, 3], 100)).unwrap();

        let wrong = SequenceFrame {
            image: image::RgbaImage::new(4, 4),
            duration_ms: 100,
        };
        assert!(sink.push_frame(&wrong).is_err());
        assert!(partial_path_for(&out).exists());
    }
    assert!(!out.exists());
    assert!(!partial_path_for(&out).exists());
}

#[test]
fn short_sequence_fails_at_end_and_leaves_no_artifact() {
    let dir = out_dir("short");
    let out = dir.join("flow.gif");
    {
        let mut sink = GifSink::new(GifSinkOpts::new(&out));
        sink.begin(SinkConfig {
            width: 8,
            height: 6,
            frame_count: 3,
        })
        .unwrap();
        sink.push_frame(&frame([1, 2, 3], 100)).unwrap();
        sink.push_frame(&frame([4, 5, 6], 100)).unwrap();
        assert!(matches!(sink.end().unwrap_err(), FlowError::Encode(_)));
    }
    assert!(!out.exists());
    assert!(!partial_path_for(&out).exists());
}

#[test]
fn refuses_to_overwrite_when_disabled() {
    let dir = out_dir("no_overwrite");
    let out = dir.join("flow.gif");
    std::fs::write(&out, b"keep me").unwrap();

    let mut opts = GifSinkOpts::new(&out);
    opts.overwrite = false;
    let seq = FrameSequence::from_frames(vec![frame([0, 0, 0], 100)]).unwrap();
    assert!(encode_sequence(&seq, &mut GifSink::new(opts)).is_err());
    assert_eq!(std::fs::read(&out).unwrap(), b"keep me");
}

#[test]
fn rejects_oversized_canvas() {
    let dir = out_dir("oversized");
    let mut sink = GifSink::new(GifSinkOpts::new(dir.join("big.gif")));
    let err = sink
        .begin(SinkConfig {
            width: 70_000,
            height: 10,
            frame_count: 1,
        })
        .unwrap_err();
    assert!(matches!(err, FlowError::Validation(_)));
}
