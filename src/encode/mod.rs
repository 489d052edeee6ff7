//! Animation encoding sinks.
//!
//! Sinks consume a finished [`FrameSequence`](crate::FrameSequence) frame by frame in display
//! order.

/// Looping GIF output through the `gif` crate.
pub mod gif;
/// Generic sink trait and built-in sinks.
pub mod sink;
