use image::RgbaImage;

use crate::animation::ease::Ease;
use crate::foundation::core::Canvas;
use crate::foundation::error::{FlowError, FlowResult};
use crate::foundation::math::lerp_u8;

/// Straight-alpha RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Blend two pixels channel by channel; `t = 0` is `a`, `t = 1` is `b`.
pub fn crossfade_pixel(a: Rgba8, b: Rgba8, t: f32) -> Rgba8 {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = lerp_u8(a[i], b[i], t);
    }
    out
}

/// Blend two same-size images into a new one.
pub fn crossfade_images(a: &RgbaImage, b: &RgbaImage, t: f32) -> FlowResult<RgbaImage> {
    if a.dimensions() != b.dimensions() {
        return Err(FlowError::validation(format!(
            "crossfade expects same-size images, got {} and {}",
            Canvas::of(a),
            Canvas::of(b)
        )));
    }
    let (w, h) = a.dimensions();
    let mut out = Vec::with_capacity(a.as_raw().len());
    for (pa, pb) in a.as_raw().chunks_exact(4).zip(b.as_raw().chunks_exact(4)) {
        out.extend_from_slice(&crossfade_pixel(
            [pa[0], pa[1], pa[2], pa[3]],
            [pb[0], pb[1], pb[2], pb[3]],
            t,
        ));
    }
    RgbaImage::from_raw(w, h, out)
        .ok_or_else(|| FlowError::validation("crossfade produced a mis-sized buffer"))
}

/// Intermediate frames of an eased crossfade from `a` to `b`.
///
/// Returns exactly `frames` images. Frame `i` (1-based) blends with weight
/// `ease(i / (frames + 1))`, so neither endpoint is repeated: the hold frames for `a` and `b`
/// already show them.
pub fn transition_frames(
    a: &RgbaImage,
    b: &RgbaImage,
    frames: u32,
    ease: Ease,
) -> FlowResult<Vec<RgbaImage>> {
    if frames == 0 {
        return Err(FlowError::validation("transition frame count must be >= 1"));
    }
    let denom = f64::from(frames) + 1.0;
    (1..=frames)
        .map(|i| {
            let alpha = ease.apply(f64::from(i) / denom);
            crossfade_images(a, b, alpha as f32)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/effects/crossfade.rs"]
mod tests;
