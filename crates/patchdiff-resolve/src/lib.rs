//! Patch resolver for patchdiff.
//!
//! Turns a list of `add` / `replace` / `remove` patches plus the state they
//! were applied to into one sparse tree holding the previous and next value
//! at every changed location. Untouched parts of the state are left out of
//! the tree entirely.
//!
//! # Quick Start
//!
//! ```rust
//! use patchdiff_resolve::{diff, is_diff};
//! use serde_json::json;
//!
//! let patches = json!([{"op": "add", "path": ["a", "b"], "value": 2}]);
//! let output = diff(&patches).apply(&json!({"a": {}})).unwrap().unwrap();
//! let tree = output.as_tree().unwrap();
//!
//! assert_eq!(tree.to_json(), json!({"a": {"b": [2]}}));
//! assert!(is_diff(tree.get(&["a".into(), "b".into()]).unwrap()));
//! ```
//!
//! # Key Types
//!
//! - [`PendingDiff`] — Patches awaiting the previous state (the curried half of [`diff`])
//! - [`Resolver`] — Resolves typed [`PatchBatch`]es under a [`DiffConfig`]
//! - [`DiffOutput`] — One [`Tree`] or one tree per patch
//! - [`DiffError`] — Malformed patch or configuration

pub mod batch;
pub mod config;
pub mod error;
pub mod lookup;
pub mod resolver;

use serde_json::Value;

pub use batch::PatchBatch;
pub use config::{Accumulation, DiffConfig};
pub use error::{DiffError, DiffResult};
pub use lookup::try_get;
pub use resolver::{DiffOutput, Resolver};

pub use patchdiff_tree::{build, is_diff, SparseSeq, Tree};
pub use patchdiff_types::{DiffNode, Patch, PatchFormatError, PatchOp, Path, PathSegment};

/// Patches captured by [`diff`], waiting for the state they were applied to.
#[derive(Clone, Debug)]
pub struct PendingDiff {
    input: Value,
    resolver: Resolver,
}

impl PendingDiff {
    /// Resolve the captured patches against `previous`.
    ///
    /// Returns `Ok(None)` when the input holds no patches (`null`, a scalar,
    /// or an empty list). A malformed patch fails the whole call.
    pub fn apply(&self, previous: &Value) -> DiffResult<Option<DiffOutput>> {
        let Some(batch) = PatchBatch::from_json(&self.input)? else {
            return Ok(None);
        };
        Ok(self.resolver.resolve(&batch, previous))
    }

    /// The raw patch input.
    pub fn input(&self) -> &Value {
        &self.input
    }
}

/// Capture a patch or list of patches using the default (merged) configuration.
pub fn diff(patches: &Value) -> PendingDiff {
    diff_with(DiffConfig::default(), patches)
}

/// Capture a patch or list of patches with an explicit configuration.
pub fn diff_with(config: DiffConfig, patches: &Value) -> PendingDiff {
    PendingDiff {
        input: patches.clone(),
        resolver: Resolver::new(config),
    }
}
