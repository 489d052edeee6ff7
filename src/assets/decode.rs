use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{FlowError, FlowResult};

/// Decode encoded image bytes into straight-alpha RGBA8, whatever the source color mode.
pub fn decode_image(bytes: &[u8]) -> FlowResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode one image file.
pub fn load_image(path: &Path) -> FlowResult<image::RgbaImage> {
    if !path.is_file() {
        return Err(FlowError::missing_file(path));
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| match e {
        FlowError::Other(err) => {
            FlowError::Other(err.context(format!("failed to decode '{}'", path.display())))
        }
        other => other,
    })
}

/// Decode every path in order.
#[tracing::instrument(skip_all, fields(count = paths.len()))]
pub fn load_images(paths: &[PathBuf]) -> FlowResult<Vec<image::RgbaImage>> {
    let mut out = Vec::with_capacity(paths.len());
    for p in paths {
        let img = load_image(p)?;
        tracing::debug!(path = %p.display(), width = img.width(), height = img.height(), "decoded");
        out.push(img);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
