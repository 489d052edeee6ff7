//! flowreel turns an ordered set of screenshots into a looping "user flow" GIF.
//!
//! Each screenshot is held for a fixed time and consecutive screenshots are joined by an eased
//! crossfade.
//!
//! # Pipeline overview
//!
//! 1. **Discover**: list the inputs of a directory in natural numeric order, or take an explicit
//!    file list ([`resolve_inputs`]).
//! 2. **Normalize**: bring every image to one canvas, either shrinking to the smallest size or
//!    padding to the largest over a blurred background ([`normalize_images`]).
//! 3. **Assemble**: interleave hold frames with eased transition frames into a
//!    [`FrameSequence`] ([`assemble_sequence`]).
//! 4. **Encode**: stream the sequence through an [`AnimationSink`], normally a [`GifSink`] that
//!    loops forever and fully replaces the canvas on every frame.
//!
//! [`render_flow`] runs all four stages from a [`FlowConfig`]. Every failure is fatal and no
//! output file is left behind.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod assets;
mod effects;
mod foundation;
mod normalize;
mod pipeline;
mod sequence;

/// Animation sinks (GIF output and in-memory capture).
pub mod encode;

pub use animation::ease::Ease;
pub use assets::decode::{decode_image, load_image, load_images};
pub use assets::discover::{
    IMAGE_EXTENSIONS, SortToken, discover_images, natural_sort_key, resolve_inputs,
};
pub use effects::crossfade::{Rgba8, crossfade_images, crossfade_pixel, transition_frames};
pub use foundation::core::Canvas;
pub use foundation::error::{FlowError, FlowResult};
pub use normalize::pad::{
    BACKGROUND_BLUR_SIGMA, BACKGROUND_SHADE_RGBA, BACKGROUND_SHADE_WEIGHT, blur_padded,
};
pub use normalize::target::{
    Normalization, NormalizationTarget, compute_target, normalize_images, shrink_to,
};
pub use pipeline::config::{DEFAULT_OUTPUT_NAME, FlowConfig};
pub use pipeline::run::{FlowStats, build_sequence, render_flow, render_flow_to_sink};
pub use sequence::assemble::{
    CrossfadeSpec, Threading, Transitions, assemble_sequence, expected_frame_count,
};
pub use sequence::frames::{FrameSequence, SequenceFrame};

pub use encode::gif::{GifSink, GifSinkOpts, delay_centis, ensure_parent_dir};
pub use encode::sink::{AnimationSink, InMemorySink, SinkConfig, encode_sequence};
