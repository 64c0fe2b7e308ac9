//! Foundation types for patchdiff.
//!
//! Every other patchdiff crate depends on `patchdiff-types`. It defines the
//! input model (paths and patches, including validation of untyped JSON
//! patches) and the tagged diff node that marks a changed location in an
//! output tree.
//!
//! # Key Types
//!
//! - [`PathSegment`] / [`Path`] — Array index or object key sequence locating a value
//! - [`Patch`] / [`PatchOp`] — One structural change (`add`, `replace`, `remove`)
//! - [`DiffNode`] — Tagged previous/next pair recorded at a changed location
//! - [`PatchFormatError`] — Hard error for structurally invalid patches

pub mod diff_node;
pub mod error;
pub mod patch;
pub mod path;

pub use diff_node::DiffNode;
pub use error::{PatchFormatError, PatchResult};
pub use patch::{Patch, PatchOp};
pub use path::{path_from_json, Path, PathSegment, MAX_ARRAY_INDEX};
