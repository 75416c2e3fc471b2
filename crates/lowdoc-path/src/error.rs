//! Error types for document path validation.

use thiserror::Error;

/// Errors that can occur while validating or composing a [`DocPath`](crate::DocPath).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path fails the safety rules (traversal or hidden component).
    #[error("invalid document path: {path:?}: {reason}")]
    Invalid { path: String, reason: String },
}

impl PathError {
    pub(crate) fn invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// The offending path, as it looked after trimming.
    pub fn path(&self) -> &str {
        match self {
            Self::Invalid { path, .. } => path,
        }
    }
}

/// Convenience type alias for path operations.
pub type Result<T> = std::result::Result<T, PathError>;
