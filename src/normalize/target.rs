use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::foundation::core::Canvas;
use crate::foundation::error::{FlowError, FlowResult};
use crate::normalize::pad::blur_padded;

/// How differently-sized inputs are brought to one canvas size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Resample every image to the smallest width and smallest height, ignoring aspect ratio.
    #[default]
    ShrinkToMin,
    /// Fit every image inside the largest width and height over a blurred copy of itself.
    PadToMaxBlur,
}

impl std::str::FromStr for Normalization {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shrink_to_min" | "shrink" | "min" => Ok(Self::ShrinkToMin),
            "pad_to_max_blur" | "pad" | "blur" | "max" => Ok(Self::PadToMaxBlur),
            other => Err(FlowError::validation(format!(
                "unknown normalization '{other}'"
            ))),
        }
    }
}

/// Canvas size derived from the input set, together with the strategy that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizationTarget {
    /// Common output dimensions.
    pub canvas: Canvas,
    /// Strategy used to reach `canvas`.
    pub strategy: Normalization,
}

/// Compute the common canvas for `images` under `strategy`.
pub fn compute_target(
    images: &[RgbaImage],
    strategy: Normalization,
) -> FlowResult<NormalizationTarget> {
    let dims = images.iter().map(|img| img.dimensions());
    let (width, height) = match strategy {
        Normalization::ShrinkToMin => dims
            .reduce(|(aw, ah), (bw, bh)| (aw.min(bw), ah.min(bh)))
            .ok_or(FlowError::EmptyInput)?,
        Normalization::PadToMaxBlur => dims
            .reduce(|(aw, ah), (bw, bh)| (aw.max(bw), ah.max(bh)))
            .ok_or(FlowError::EmptyInput)?,
    };
    Ok(NormalizationTarget {
        canvas: Canvas::new(width, height)?,
        strategy,
    })
}

/// Resample `img` to exactly `canvas` (Lanczos3), returning it untouched when it already fits.
pub fn shrink_to(img: RgbaImage, canvas: Canvas) -> RgbaImage {
    if canvas.matches(&img) {
        return img;
    }
    imageops::resize(&img, canvas.width, canvas.height, FilterType::Lanczos3)
}

/// Bring every image to one common size, preserving order.
///
/// A single image is already normalized and is returned as-is.
#[tracing::instrument(skip(images), fields(count = images.len()))]
pub fn normalize_images(
    images: Vec<RgbaImage>,
    strategy: Normalization,
) -> FlowResult<(NormalizationTarget, Vec<RgbaImage>)> {
    let target = compute_target(&images, strategy)?;
    if images.len() == 1 {
        return Ok((target, images));
    }

    match strategy {
        Normalization::ShrinkToMin => {
            tracing::info!(canvas = %target.canvas, "resizing all images to smallest size");
            let out = images
                .into_iter()
                .map(|img| shrink_to(img, target.canvas))
                .collect();
            Ok((target, out))
        }
        Normalization::PadToMaxBlur => {
            tracing::info!(canvas = %target.canvas, "normalizing with blur padding");
            let out = images
                .iter()
                .map(|img| blur_padded(img, target.canvas))
                .collect::<FlowResult<Vec<_>>>()?;
            Ok((target, out))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/normalize/target.rs"]
mod tests;
