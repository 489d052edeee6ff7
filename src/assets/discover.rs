use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{FlowError, FlowResult};

/// File extensions (lowercase) picked up by directory auto-discovery.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// One numeric component of a [`natural_sort_key`].
///
/// Holds the decimal digits without leading zeros and orders by value with no upper bound, so a
/// 30-digit build number still sorts after `9`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SortToken(String);

impl SortToken {
    fn parse(tok: &str) -> Self {
        let tok = tok.trim();
        if tok.is_empty() || !tok.bytes().all(|b| b.is_ascii_digit()) {
            return Self("0".to_owned());
        }
        match tok.trim_start_matches('0') {
            "" => Self("0".to_owned()),
            digits => Self(digits.to_owned()),
        }
    }

    /// Decimal digits of the value.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl From<u64> for SortToken {
    fn from(v: u64) -> Self {
        Self(v.to_string())
    }
}

impl Ord for SortToken {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for SortToken {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Natural ordering key for screenshot file names.
///
/// The extension is dropped, only the part before the first `-` is considered, and that part is
/// split on `.` and `_` into integer tokens. Non-numeric tokens count as `0`, so `3_1-login.png`
/// sorts as `[3, 1]` and lands after `3-home.png` (`[3]`).
pub fn natural_sort_key(file_name: &str) -> Vec<SortToken> {
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _ext)| stem);
    let prefix = stem.split('-').next().unwrap_or_default();
    prefix.split(['.', '_']).map(SortToken::parse).collect()
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// List image files in `dir` sorted by [`natural_sort_key`], ties broken by file name.
#[tracing::instrument]
pub fn discover_images(dir: &Path) -> FlowResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(FlowError::source_not_found(dir));
    }

    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory '{}'", dir.display()))?;

    let mut named = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() || !has_image_extension(&path) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()).map(str::to_owned) else {
            tracing::warn!(path = %path.display(), "skipping file with non-UTF-8 name");
            continue;
        };
        named.push((natural_sort_key(&name), name, path));
    }

    named.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    tracing::debug!(count = named.len(), "discovered input images");
    Ok(named.into_iter().map(|(_, _, path)| path).collect())
}

/// Resolve the ordered list of input paths.
///
/// With `files = Some(..)` the names are joined onto `dir` in the given order and each must
/// exist; otherwise the directory is auto-discovered.
pub fn resolve_inputs(dir: &Path, files: Option<&[String]>) -> FlowResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(FlowError::source_not_found(dir));
    }

    let paths = match files {
        None => discover_images(dir)?,
        Some(files) => {
            let mut out = Vec::with_capacity(files.len());
            for f in files {
                let p = dir.join(f);
                if !p.is_file() {
                    return Err(FlowError::missing_file(p));
                }
                out.push(p);
            }
            out
        }
    };

    if paths.is_empty() {
        return Err(FlowError::EmptyInput);
    }
    Ok(paths)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/discover.rs"]
mod tests;
