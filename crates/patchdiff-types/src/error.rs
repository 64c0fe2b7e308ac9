use thiserror::Error;

use crate::patch::PatchOp;

/// Errors produced when a JSON value does not describe a usable patch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchFormatError {
    #[error("patch must be a JSON object, got {0}")]
    NotAnObject(String),

    #[error("patch has no `path` field")]
    MissingPath,

    #[error("patch `path` must be an array, got {0}")]
    PathNotArray(String),

    #[error("path segment {position} must be a non-negative integer or a string, got {found}")]
    InvalidSegment { position: usize, found: String },

    #[error("patch has no `op` field")]
    MissingOp,

    #[error("unknown patch op: {0:?}")]
    UnknownOp(String),

    #[error("`{0}` patch has no `value` field")]
    MissingValue(PatchOp),
}

/// Convenience alias for patch parsing results.
pub type PatchResult<T> = Result<T, PatchFormatError>;
