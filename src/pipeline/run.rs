use std::path::PathBuf;

use crate::assets::decode::load_images;
use crate::assets::discover::resolve_inputs;
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::sink::{AnimationSink, encode_sequence};
use crate::foundation::core::Canvas;
use crate::foundation::error::FlowResult;
use crate::normalize::target::normalize_images;
use crate::pipeline::config::FlowConfig;
use crate::sequence::assemble::{Transitions, assemble_sequence};
use crate::sequence::frames::FrameSequence;

/// Summary of a finished run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowStats {
    /// Number of source screenshots.
    pub inputs: usize,
    /// Normalized canvas size.
    pub canvas: Canvas,
    /// Total frames written (holds plus transition frames).
    pub frames: usize,
    /// Sum of all frame durations in milliseconds.
    pub total_duration_ms: u64,
}

/// Discover, decode, normalize and assemble the frame sequence for `cfg`.
///
/// No output is touched; failures here leave the filesystem unchanged.
#[tracing::instrument(skip_all, fields(source = %cfg.source_dir.display()))]
pub fn build_sequence(cfg: &FlowConfig) -> FlowResult<(usize, FrameSequence)> {
    cfg.validate()?;
    let paths = resolve_inputs(&cfg.source_dir, cfg.files.as_deref())?;
    let images = load_images(&paths)?;
    let inputs = images.len();

    let (target, normalized) = normalize_images(images, cfg.normalization)?;
    tracing::debug!(canvas = %target.canvas, strategy = ?target.strategy, "normalized inputs");

    let seq = assemble_sequence(normalized, cfg.hold_ms, &cfg.transitions, &cfg.threading)?;
    match &cfg.transitions {
        Transitions::Crossfade(spec) if inputs > 1 => tracing::info!(
            frames = seq.len(),
            transition_frames = spec.frames,
            "creating gif with crossfades between each screen"
        ),
        _ => tracing::info!(frames = seq.len(), "creating gif without transitions"),
    }
    Ok((inputs, seq))
}

/// Run the whole pipeline and stream the result into `sink`.
pub fn render_flow_to_sink(
    cfg: &FlowConfig,
    sink: &mut dyn AnimationSink,
) -> FlowResult<FlowStats> {
    let (inputs, seq) = build_sequence(cfg)?;
    encode_sequence(&seq, sink)?;
    Ok(FlowStats {
        inputs,
        canvas: seq.canvas(),
        frames: seq.len(),
        total_duration_ms: seq.total_duration_ms(),
    })
}

/// Run the whole pipeline and write the looping GIF to [`FlowConfig::output_path`].
///
/// Returns the written path with the run summary. Nothing is created at the output path unless
/// every stage succeeds.
pub fn render_flow(cfg: &FlowConfig) -> FlowResult<(PathBuf, FlowStats)> {
    let out_path = cfg.output_path();
    let mut sink = GifSink::new(GifSinkOpts {
        overwrite: cfg.overwrite,
        ..GifSinkOpts::new(&out_path)
    });
    let stats = render_flow_to_sink(cfg, &mut sink)?;
    tracing::info!(path = %out_path.display(), frames = stats.frames, "gif written");
    Ok((out_path, stats))
}
