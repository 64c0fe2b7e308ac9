use serde::{Deserialize, Serialize};

use crate::error::{DiffError, DiffResult};

/// How the trees produced for individual patches are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accumulation {
    /// Every patch folds into one shared tree, returned bare.
    #[default]
    Merged,
    /// Every patch gets its own tree; a list is returned unless the input
    /// was a single (non-list) patch.
    PerPatch,
}

/// Configuration for a [`Resolver`](crate::Resolver).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// Accumulation policy. Defaults to [`Accumulation::Merged`].
    pub accumulation: Accumulation,
}

impl DiffConfig {
    /// Fold all patches into one tree.
    pub fn merged() -> Self {
        Self {
            accumulation: Accumulation::Merged,
        }
    }

    /// Produce one tree per patch.
    pub fn per_patch() -> Self {
        Self {
            accumulation: Accumulation::PerPatch,
        }
    }

    /// Parse from TOML, e.g. `accumulation = "per-patch"`. Missing keys take defaults.
    pub fn from_toml_str(source: &str) -> DiffResult<Self> {
        toml::from_str(source).map_err(|e| DiffError::Config(e.to_string()))
    }
}
