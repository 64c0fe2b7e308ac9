//! Tagged previous/next records for changed locations.
//!
//! A [`DiffNode`] is what an output tree holds wherever a patch touched it.
//! The tag is the enum variant itself, so a plain JSON array that happens to
//! look like `[old, new]` can never be mistaken for one.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

use crate::patch::PatchOp;

/// Filler appended after the old value of a removal: `[old, 0, 0]`.
pub const REMOVAL_FILLER: [u8; 2] = [0, 0];

/// The previous and/or next value recorded at one changed location.
///
/// `old` is `None` when the previous state had nothing at the path.
#[derive(Clone, Debug, PartialEq)]
pub enum DiffNode {
    /// `[value]`
    Add { value: Value },
    /// `[old, new]`
    Replace { old: Option<Value>, new: Value },
    /// `[old, 0, 0]`
    Remove { old: Option<Value> },
}

impl DiffNode {
    pub fn add(value: Value) -> Self {
        Self::Add { value }
    }

    pub fn replace(old: Option<Value>, new: Value) -> Self {
        Self::Replace { old, new }
    }

    pub fn remove(old: Option<Value>) -> Self {
        Self::Remove { old }
    }

    /// The patch operation that produced this node.
    pub fn kind(&self) -> PatchOp {
        match self {
            Self::Add { .. } => PatchOp::Add,
            Self::Replace { .. } => PatchOp::Replace,
            Self::Remove { .. } => PatchOp::Remove,
        }
    }

    /// Number of elements in the bare list form (1, 2 or 3).
    pub fn len(&self) -> usize {
        match self {
            Self::Add { .. } => 1,
            Self::Replace { .. } => 2,
            Self::Remove { .. } => 3,
        }
    }

    /// Always `false`; a diff node carries at least one element.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The previous value, if the node records one and it existed.
    pub fn old(&self) -> Option<&Value> {
        match self {
            Self::Add { .. } => None,
            Self::Replace { old, .. } | Self::Remove { old } => old.as_ref(),
        }
    }

    /// The next value, for `add` and `replace`.
    pub fn new_value(&self) -> Option<&Value> {
        match self {
            Self::Add { value } => Some(value),
            Self::Replace { new, .. } => Some(new),
            Self::Remove { .. } => None,
        }
    }

    /// The bare list form. A missing old value becomes `null`.
    pub fn values(&self) -> Vec<Value> {
        match self {
            Self::Add { value } => vec![value.clone()],
            Self::Replace { old, new } => vec![old.clone().unwrap_or(Value::Null), new.clone()],
            Self::Remove { old } => {
                let mut values = vec![old.clone().unwrap_or(Value::Null)];
                values.extend(REMOVAL_FILLER.iter().map(|&z| Value::from(z)));
                values
            }
        }
    }

    /// The bare list form as a JSON array.
    pub fn to_json(&self) -> Value {
        Value::Array(self.values())
    }
}

impl Serialize for DiffNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        match self {
            Self::Add { value } => seq.serialize_element(value)?,
            Self::Replace { old, new } => {
                seq.serialize_element(old)?;
                seq.serialize_element(new)?;
            }
            Self::Remove { old } => {
                seq.serialize_element(old)?;
                for filler in REMOVAL_FILLER {
                    seq.serialize_element(&filler)?;
                }
            }
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_lists_per_kind() {
        assert_eq!(DiffNode::add(json!(2)).values(), vec![json!(2)]);
        assert_eq!(
            DiffNode::replace(Some(json!({"c": 2})), json!(3)).values(),
            vec![json!({"c": 2}), json!(3)]
        );
        assert_eq!(
            DiffNode::remove(Some(json!("x"))).values(),
            vec![json!("x"), json!(0), json!(0)]
        );
    }

    #[test]
    fn lengths_match_bare_lists() {
        for node in [
            DiffNode::add(json!(1)),
            DiffNode::replace(None, json!(1)),
            DiffNode::remove(None),
        ] {
            assert_eq!(node.len(), node.values().len());
            assert!(!node.is_empty());
        }
    }

    #[test]
    fn missing_old_value_materializes_as_null() {
        let node = DiffNode::remove(None);
        assert_eq!(node.old(), None);
        assert_eq!(node.to_json(), json!([null, 0, 0]));
    }

    #[test]
    fn accessors() {
        let node = DiffNode::replace(Some(json!("b")), json!("c"));
        assert_eq!(node.kind(), PatchOp::Replace);
        assert_eq!(node.old(), Some(&json!("b")));
        assert_eq!(node.new_value(), Some(&json!("c")));
        assert_eq!(DiffNode::add(json!(1)).old(), None);
        assert_eq!(DiffNode::remove(None).new_value(), None);
    }

    #[test]
    fn serializes_as_bare_list() {
        let node = DiffNode::remove(Some(json!({"c": 2})));
        assert_eq!(serde_json::to_value(&node).unwrap(), json!([{"c": 2}, 0, 0]));
        assert_eq!(serde_json::to_value(&node).unwrap(), node.to_json());
    }
}
