use serde_json::Value;

use patchdiff_types::Patch;

use crate::error::{DiffError, DiffResult};

/// Normalized resolver input: one patch or a list of patches.
///
/// The distinction only affects the shape of the per-patch output.
#[derive(Clone, Debug, PartialEq)]
pub enum PatchBatch {
    Single(Patch),
    Many(Vec<Patch>),
}

impl PatchBatch {
    /// Interpret untyped input.
    ///
    /// An object is a single patch and an array is a list. `null`, scalars
    /// and empty arrays yield `Ok(None)`. Any element that is not a valid
    /// patch fails the whole batch with [`DiffError::Format`].
    pub fn from_json(input: &Value) -> DiffResult<Option<Self>> {
        match input {
            Value::Object(_) => Patch::from_json(input)
                .map(|patch| Some(Self::Single(patch)))
                .map_err(|source| DiffError::Format { index: 0, source }),
            Value::Array(items) if items.is_empty() => Ok(None),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    Patch::from_json(item).map_err(|source| DiffError::Format { index, source })
                })
                .collect::<DiffResult<Vec<_>>>()
                .map(|patches| Some(Self::Many(patches))),
            _ => Ok(None),
        }
    }

    /// Whether the caller supplied a list.
    pub fn was_list(&self) -> bool {
        matches!(self, Self::Many(_))
    }

    pub fn patches(&self) -> &[Patch] {
        match self {
            Self::Single(patch) => std::slice::from_ref(patch),
            Self::Many(patches) => patches,
        }
    }

    pub fn len(&self) -> usize {
        self.patches().len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches().is_empty()
    }
}

impl From<Patch> for PatchBatch {
    fn from(patch: Patch) -> Self {
        Self::Single(patch)
    }
}

impl From<Vec<Patch>> for PatchBatch {
    fn from(patches: Vec<Patch>) -> Self {
        Self::Many(patches)
    }
}
