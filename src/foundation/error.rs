use std::path::PathBuf;

/// Convenience result type used across flowreel.
pub type FlowResult<T> = Result<T, FlowError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Every variant is fatal for the run: nothing is retried and no partial output is written.
#[derive(thiserror::Error, Debug)]
pub enum FlowError {
    /// The input directory does not exist.
    #[error("source folder not found: {}", path.display())]
    SourceNotFound {
        /// Directory that was looked up.
        path: PathBuf,
    },

    /// A file named in an explicit input list does not exist.
    #[error("missing file: {}", path.display())]
    MissingFile {
        /// Full path of the missing file.
        path: PathBuf,
    },

    /// No usable images were found or provided.
    #[error("no input images to animate")]
    EmptyInput,

    /// Invalid user-provided configuration or inconsistent pipeline data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors raised while encoding the animated output.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlowError {
    /// Build a [`FlowError::SourceNotFound`] value.
    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    /// Build a [`FlowError::MissingFile`] value.
    pub fn missing_file(path: impl Into<PathBuf>) -> Self {
        Self::MissingFile { path: path.into() }
    }

    /// Build a [`FlowError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlowError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
