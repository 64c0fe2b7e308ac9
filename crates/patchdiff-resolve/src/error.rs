//! Error types for the resolver crate.

use patchdiff_types::PatchFormatError;

/// Errors that can occur while resolving patches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// A patch in the input is structurally unusable.
    #[error("malformed patch at index {index}: {source}")]
    Format {
        index: usize,
        #[source]
        source: PatchFormatError,
    },

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl DiffError {
    /// The position of the offending patch, for format errors.
    pub fn patch_index(&self) -> Option<usize> {
        match self {
            Self::Format { index, .. } => Some(*index),
            Self::Config(_) => None,
        }
    }
}

/// Convenience alias for resolver results.
pub type DiffResult<T> = Result<T, DiffError>;
