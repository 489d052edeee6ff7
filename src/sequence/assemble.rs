use image::RgbaImage;
use rayon::prelude::*;

use crate::animation::ease::Ease;
use crate::effects::crossfade::transition_frames;
use crate::foundation::error::{FlowError, FlowResult};
use crate::sequence::frames::FrameSequence;

/// Crossfade parameters used between consecutive screenshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CrossfadeSpec {
    /// Number of intermediate frames per transition (>= 1).
    pub frames: u32,
    /// Display time of each intermediate frame in milliseconds (> 0).
    pub frame_duration_ms: u32,
    /// Progress-to-weight curve.
    pub ease: Ease,
}

impl Default for CrossfadeSpec {
    fn default() -> Self {
        Self {
            frames: 20,
            frame_duration_ms: 40,
            ease: Ease::Smoothstep,
        }
    }
}

impl CrossfadeSpec {
    /// Check frame count and duration bounds.
    pub fn validate(&self) -> FlowResult<()> {
        if self.frames == 0 {
            return Err(FlowError::validation("transition frames must be >= 1"));
        }
        if self.frame_duration_ms == 0 {
            return Err(FlowError::validation(
                "transition frame duration must be > 0 ms",
            ));
        }
        Ok(())
    }
}

/// Whether and how consecutive screenshots are connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transitions {
    /// Hard cuts: only hold frames are emitted.
    Disabled,
    /// Eased crossfade between every adjacent pair.
    Crossfade(CrossfadeSpec),
}

impl Default for Transitions {
    fn default() -> Self {
        Self::Crossfade(CrossfadeSpec::default())
    }
}

/// Threading controls for transition synthesis.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Threading {
    /// Synthesize adjacent-pair transitions in parallel when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

/// Number of frames [`assemble_sequence`] produces for `images` inputs.
pub fn expected_frame_count(images: usize, transitions: &Transitions) -> usize {
    match transitions {
        Transitions::Crossfade(spec) if images > 1 => {
            images + (images - 1) * spec.frames as usize
        }
        _ => images,
    }
}

/// Interleave hold frames and transition frames in source order.
///
/// Output order is `hold0, [fade0->1], hold1, [fade1->2], ..., hold(M-1)`. Every hold frame lasts
/// `hold_ms`; every transition frame lasts the crossfade frame duration.
#[tracing::instrument(skip(images), fields(count = images.len()))]
pub fn assemble_sequence(
    images: Vec<RgbaImage>,
    hold_ms: u32,
    transitions: &Transitions,
    threading: &Threading,
) -> FlowResult<FrameSequence> {
    if images.is_empty() {
        return Err(FlowError::EmptyInput);
    }
    if hold_ms == 0 {
        return Err(FlowError::validation("hold duration must be > 0 ms"));
    }

    let spec = match transitions {
        Transitions::Crossfade(spec) if images.len() > 1 => {
            spec.validate()?;
            *spec
        }
        _ => return holds_only(images, hold_ms),
    };

    let fades = synthesize_pairs(&images, &spec, threading)?;

    let mut it = images.into_iter();
    let first = it.next().ok_or(FlowError::EmptyInput)?;
    let mut seq = FrameSequence::new(first, hold_ms)?;
    for (img, fade) in it.zip(fades) {
        for frame in fade {
            seq.push(frame, spec.frame_duration_ms)?;
        }
        seq.push(img, hold_ms)?;
    }

    tracing::debug!(frames = seq.len(), "assembled sequence with transitions");
    Ok(seq)
}

fn holds_only(images: Vec<RgbaImage>, hold_ms: u32) -> FlowResult<FrameSequence> {
    let mut it = images.into_iter();
    let first = it.next().ok_or(FlowError::EmptyInput)?;
    let mut seq = FrameSequence::new(first, hold_ms)?;
    for img in it {
        seq.push(img, hold_ms)?;
    }
    Ok(seq)
}

/// Transition frames for every adjacent pair, indexed by the pair's first image.
fn synthesize_pairs(
    images: &[RgbaImage],
    spec: &CrossfadeSpec,
    threading: &Threading,
) -> FlowResult<Vec<Vec<RgbaImage>>> {
    let pair = |i: usize| transition_frames(&images[i], &images[i + 1], spec.frames, spec.ease);
    let pairs = images.len() - 1;

    if !threading.parallel || pairs < 2 {
        return (0..pairs).map(pair).collect();
    }

    let pool = build_thread_pool(threading.threads)?;
    // `collect` on an indexed parallel iterator keeps pair order.
    pool.install(|| (0..pairs).into_par_iter().map(pair).collect())
}

fn build_thread_pool(threads: Option<usize>) -> FlowResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FlowError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FlowError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/assemble.rs"]
mod tests;
