use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{FlowError, FlowResult};
use crate::normalize::target::Normalization;
use crate::sequence::assemble::{Threading, Transitions};

/// File name used when no output path is configured.
pub const DEFAULT_OUTPUT_NAME: &str = "user-flow.gif";

/// Immutable settings for one run, fixed before the pipeline starts.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Directory holding the screenshots.
    pub source_dir: PathBuf,
    /// Explicit ordered file names inside `source_dir`; `None` auto-discovers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    /// Output GIF path; defaults to `source_dir/user-flow.gif`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_path: Option<PathBuf>,
    /// Overwrite an existing output file.
    pub overwrite: bool,
    /// How long each screenshot is held, in milliseconds.
    pub hold_ms: u32,
    /// Size normalization strategy.
    pub normalization: Normalization,
    /// Transition behavior between consecutive screenshots.
    pub transitions: Transitions,
    /// Threading for transition synthesis.
    pub threading: Threading,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            files: None,
            out_path: None,
            overwrite: true,
            hold_ms: 2000,
            normalization: Normalization::default(),
            transitions: Transitions::default(),
            threading: Threading::default(),
        }
    }
}

impl FlowConfig {
    /// Default settings reading from `source_dir`.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            ..Self::default()
        }
    }

    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> FlowResult<Self> {
        let cfg: Self = serde_json::from_str(json).context("parse flow config json")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    ///
    /// A relative `source_dir` (and `out_path`) is resolved against the config file's directory.
    pub fn from_path(path: &Path) -> FlowResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        let mut cfg = Self::from_json_str(&json)?;
        if let Some(base) = path.parent() {
            if cfg.source_dir.is_relative() {
                cfg.source_dir = base.join(&cfg.source_dir);
            }
            if let Some(out) = cfg.out_path.as_mut()
                && out.is_relative()
            {
                *out = base.join(&*out);
            }
        }
        Ok(cfg)
    }

    /// Check value bounds before any work starts.
    pub fn validate(&self) -> FlowResult<()> {
        if self.hold_ms == 0 {
            return Err(FlowError::validation("hold_ms must be > 0"));
        }
        if let Transitions::Crossfade(spec) = &self.transitions {
            spec.validate()?;
        }
        if let Some(files) = &self.files
            && files.is_empty()
        {
            return Err(FlowError::EmptyInput);
        }
        if let Some(0) = self.threading.threads {
            return Err(FlowError::validation("threading.threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Where the GIF will be written.
    pub fn output_path(&self) -> PathBuf {
        self.out_path
            .clone()
            .unwrap_or_else(|| self.source_dir.join(DEFAULT_OUTPUT_NAME))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;
