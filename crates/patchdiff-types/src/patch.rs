use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PatchFormatError, PatchResult};
use crate::path::{path_from_json, Path, PathSegment};

/// The kind of structural change a [`Patch`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// A value was inserted where none existed.
    Add,
    /// An existing value was swapped for a new one.
    Replace,
    /// An existing value was deleted.
    Remove,
}

impl PatchOp {
    /// Wire name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Replace => "replace",
            Self::Remove => "remove",
        }
    }

    /// Parse a wire name. Returns `None` for anything other than the three ops.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "add" => Some(Self::Add),
            "replace" => Some(Self::Replace),
            "remove" => Some(Self::Remove),
            _ => None,
        }
    }

    /// Whether patches of this kind must carry a `value`.
    pub fn requires_value(&self) -> bool {
        !matches!(self, Self::Remove)
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structural change: `op` applied at `path`, with `value` for `add` and `replace`.
///
/// Deserialization goes through [`Patch::from_json`], so serde input is held
/// to the same rules as untyped JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Patch {
    pub op: PatchOp,
    pub path: Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl Patch {
    /// An `add` patch.
    pub fn add<P, S>(path: P, value: Value) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            op: PatchOp::Add,
            path: path.into_iter().map(Into::into).collect(),
            value: Some(value),
        }
    }

    /// A `replace` patch.
    pub fn replace<P, S>(path: P, value: Value) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            op: PatchOp::Replace,
            path: path.into_iter().map(Into::into).collect(),
            value: Some(value),
        }
    }

    /// A `remove` patch.
    pub fn remove<P, S>(path: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        Self {
            op: PatchOp::Remove,
            path: path.into_iter().map(Into::into).collect(),
            value: None,
        }
    }

    /// Returns `true` if the patch addresses the whole state.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// The new value, or `null` when the patch carries none.
    pub fn new_value(&self) -> Value {
        self.value.clone().unwrap_or(Value::Null)
    }

    /// Validate and convert an untyped JSON patch.
    ///
    /// The `path` is checked first, then `op`, then the presence of `value`
    /// for ops that need one. Extra fields are ignored.
    pub fn from_json(value: &Value) -> PatchResult<Self> {
        let Value::Object(fields) = value else {
            return Err(PatchFormatError::NotAnObject(value.to_string()));
        };

        let path = fields
            .get("path")
            .ok_or(PatchFormatError::MissingPath)
            .and_then(path_from_json)?;

        let op = match fields.get("op") {
            None => return Err(PatchFormatError::MissingOp),
            Some(Value::String(name)) => {
                PatchOp::parse(name).ok_or_else(|| PatchFormatError::UnknownOp(name.clone()))?
            }
            Some(other) => return Err(PatchFormatError::UnknownOp(other.to_string())),
        };

        let value = fields.get("value").cloned();
        if op.requires_value() && value.is_none() {
            return Err(PatchFormatError::MissingValue(op));
        }

        Ok(Self {
            op,
            path,
            value: if op.requires_value() { value } else { None },
        })
    }
}

impl TryFrom<Value> for Patch {
    type Error = PatchFormatError;

    fn try_from(value: Value) -> PatchResult<Self> {
        Self::from_json(&value)
    }
}
