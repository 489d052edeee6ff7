use image::RgbaImage;

use crate::foundation::core::Canvas;
use crate::foundation::error::{FlowError, FlowResult};

/// One image of the output animation and how long it stays on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceFrame {
    /// Straight-alpha RGBA8 pixels.
    pub image: RgbaImage,
    /// Display time in milliseconds, always > 0.
    pub duration_ms: u32,
}

/// Ordered, non-empty list of frames that all share one canvas size.
///
/// Construction and [`FrameSequence::push`] enforce the invariants, so a value of this type is
/// always safe to hand to an [`AnimationSink`](crate::AnimationSink).
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSequence {
    canvas: Canvas,
    frames: Vec<SequenceFrame>,
}

impl FrameSequence {
    /// Start a sequence with its first frame; the frame fixes the canvas size.
    pub fn new(first: RgbaImage, duration_ms: u32) -> FlowResult<Self> {
        let (w, h) = first.dimensions();
        let canvas = Canvas::new(w, h)?;
        check_duration(duration_ms)?;
        Ok(Self {
            canvas,
            frames: vec![SequenceFrame {
                image: first,
                duration_ms,
            }],
        })
    }

    /// Build a sequence from already-paired frames.
    pub fn from_frames(frames: Vec<SequenceFrame>) -> FlowResult<Self> {
        let mut it = frames.into_iter();
        let first = it.next().ok_or(FlowError::EmptyInput)?;
        let mut seq = Self::new(first.image, first.duration_ms)?;
        for f in it {
            seq.push(f.image, f.duration_ms)?;
        }
        Ok(seq)
    }

    /// Append a frame, rejecting size mismatches and zero durations.
    pub fn push(&mut self, image: RgbaImage, duration_ms: u32) -> FlowResult<()> {
        if !self.canvas.matches(&image) {
            return Err(FlowError::validation(format!(
                "frame {} is {}, sequence canvas is {}",
                self.frames.len(),
                Canvas::of(&image),
                self.canvas
            )));
        }
        check_duration(duration_ms)?;
        self.frames.push(SequenceFrame { image, duration_ms });
        Ok(())
    }

    /// Shared frame dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Frames in display order.
    pub fn frames(&self) -> &[SequenceFrame] {
        &self.frames
    }

    /// Number of frames (always >= 1).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Per-frame durations in display order.
    pub fn durations(&self) -> Vec<u32> {
        self.frames.iter().map(|f| f.duration_ms).collect()
    }

    /// Sum of all frame durations in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.duration_ms)).sum()
    }

    /// Consume the sequence and return its frames.
    pub fn into_frames(self) -> Vec<SequenceFrame> {
        self.frames
    }
}

fn check_duration(duration_ms: u32) -> FlowResult<()> {
    if duration_ms == 0 {
        return Err(FlowError::validation("frame duration must be > 0 ms"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/frames.rs"]
mod tests;
