use crate::foundation::error::{FlowError, FlowResult};
use crate::sequence::frames::{FrameSequence, SequenceFrame};

/// Configuration provided to an [`AnimationSink`] before any frame is pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Number of frames that will follow; `GifSink` rejects a stream of any other length.
    pub frame_count: usize,
}

/// Sink contract for consuming a frame sequence.
///
/// Ordering contract: `push_frame` is called once per frame in display order, between exactly one
/// `begin` and one `end`. A sink must not leave a visible artifact behind unless `end` succeeds.
pub trait AnimationSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> FlowResult<()>;
    /// Push one frame with its display duration.
    fn push_frame(&mut self, frame: &SequenceFrame) -> FlowResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> FlowResult<()>;
}

/// Stream every frame of `seq` through `sink`.
#[tracing::instrument(skip_all, fields(frames = seq.len(), canvas = %seq.canvas()))]
pub fn encode_sequence(seq: &FrameSequence, sink: &mut dyn AnimationSink) -> FlowResult<()> {
    let canvas = seq.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        frame_count: seq.len(),
    })?;
    for frame in seq.frames() {
        sink.push_frame(frame)?;
    }
    sink.end()
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<SequenceFrame>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[SequenceFrame] {
        &self.frames
    }

    /// `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl AnimationSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FlowResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &SequenceFrame) -> FlowResult<()> {
        if self.cfg.is_none() {
            return Err(FlowError::encode("in-memory sink not started"));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> FlowResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
