use std::borrow::Cow;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::foundation::core::Canvas;
use crate::foundation::error::{FlowError, FlowResult};
use crate::foundation::math::lerp_u8;

/// Gaussian sigma used for the padded background.
pub const BACKGROUND_BLUR_SIGMA: f32 = 30.0;
/// Straight-alpha overlay color the blurred background is blended toward.
pub const BACKGROUND_SHADE_RGBA: [u8; 4] = [0, 0, 0, 100];
/// Blend weight of [`BACKGROUND_SHADE_RGBA`] over the blurred background.
pub const BACKGROUND_SHADE_WEIGHT: f32 = 0.3;

/// Fit `img` inside `canvas` over a blurred, darkened copy of itself.
///
/// Images already at the canvas size are returned unchanged. Larger images are scaled down with
/// their aspect ratio kept; smaller images are never scaled up, only centered.
pub fn blur_padded(img: &RgbaImage, canvas: Canvas) -> FlowResult<RgbaImage> {
    if canvas.matches(img) {
        return Ok(img.clone());
    }
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(FlowError::validation("cannot pad an empty image"));
    }

    let scale =
        (f64::from(canvas.width) / f64::from(w)).min(f64::from(canvas.height) / f64::from(h));
    let fitted: Cow<'_, RgbaImage> = if scale < 1.0 {
        let (fw, fh) = scaled_dims(w, h, scale);
        Cow::Owned(imageops::resize(img, fw, fh, FilterType::Lanczos3))
    } else {
        Cow::Borrowed(img)
    };

    let mut bg = blurred_background(&fitted, canvas);

    let (fw, fh) = fitted.dimensions();
    let x = (canvas.width.saturating_sub(fw) / 2) as i64;
    let y = (canvas.height.saturating_sub(fh) / 2) as i64;
    imageops::overlay(&mut bg, &*fitted, x, y);
    Ok(bg)
}

fn scaled_dims(w: u32, h: u32, scale: f64) -> (u32, u32) {
    let sw = ((f64::from(w) * scale) as u32).max(1);
    let sh = ((f64::from(h) * scale) as u32).max(1);
    (sw, sh)
}

/// Cover-scale, center-crop, blur and shade `img` into a canvas-sized background.
fn blurred_background(img: &RgbaImage, canvas: Canvas) -> RgbaImage {
    let (w, h) = img.dimensions();
    let cover =
        (f64::from(canvas.width) / f64::from(w)).max(f64::from(canvas.height) / f64::from(h));
    let (bw, bh) = scaled_dims(w, h, cover);
    // Float truncation can land one pixel short of the canvas.
    let (bw, bh) = (bw.max(canvas.width), bh.max(canvas.height));

    let covered = imageops::resize(img, bw, bh, FilterType::Lanczos3);
    let left = (bw - canvas.width) / 2;
    let top = (bh - canvas.height) / 2;
    let cropped = imageops::crop_imm(&covered, left, top, canvas.width, canvas.height).to_image();

    let mut bg = imageops::blur(&cropped, BACKGROUND_BLUR_SIGMA);

    for px in bg.pixels_mut() {
        for c in 0..4 {
            px.0[c] = lerp_u8(px.0[c], BACKGROUND_SHADE_RGBA[c], BACKGROUND_SHADE_WEIGHT);
        }
    }
    bg
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/pad.rs"]
mod tests;
