//! Sparse nested output trees.
//!
//! A [`Tree`] mirrors only the parts of a state that a set of patches
//! touched. Containers are created lazily along each path by [`build`];
//! arrays are [`SparseSeq`]s, so indices no patch reached stay absent
//! instead of being padded with nulls.
//!
//! # Key Types
//!
//! - [`SparseSeq`] — Index-addressed sequence with genuine holes
//! - [`Tree`] — Diff node, plain value, object, or sparse array
//! - [`build`] — Place a leaf at a path, extending an optional seed tree

pub mod builder;
pub mod sparse;
pub mod tree;

pub use builder::build;
pub use sparse::SparseSeq;
pub use tree::{is_diff, Tree};
