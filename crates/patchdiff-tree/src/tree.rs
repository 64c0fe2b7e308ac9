use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use patchdiff_types::{DiffNode, PathSegment};

use crate::sparse::SparseSeq;

/// A sparse nested tree whose changed leaves are [`DiffNode`]s.
#[derive(Clone, Debug, PartialEq)]
pub enum Tree {
    /// A tagged change record.
    Diff(DiffNode),
    /// A plain, untagged value.
    Value(Value),
    /// A mapping from key to subtree.
    Object(BTreeMap<String, Tree>),
    /// An ordered sequence of subtrees, possibly with holes.
    Array(SparseSeq<Tree>),
}

/// Returns `true` only for a tagged [`Tree::Diff`].
///
/// A [`Tree::Value`] holding an array with exactly the same elements as a
/// diff node's bare list is not a diff.
pub fn is_diff(tree: &Tree) -> bool {
    matches!(tree, Tree::Diff(_))
}

impl Tree {
    /// An empty object container.
    pub fn object() -> Self {
        Self::Object(BTreeMap::new())
    }

    /// An empty array container.
    pub fn array() -> Self {
        Self::Array(SparseSeq::new())
    }

    /// Returns `true` for [`Tree::Object`] and [`Tree::Array`].
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    pub fn as_diff(&self) -> Option<&DiffNode> {
        match self {
            Self::Diff(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Tree>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&SparseSeq<Tree>> {
        match self {
            Self::Array(seq) => Some(seq),
            _ => None,
        }
    }

    /// The direct child addressed by `segment`.
    pub fn child(&self, segment: &PathSegment) -> Option<&Tree> {
        match self {
            Self::Object(map) => map.get(&*segment.as_key()),
            Self::Array(seq) => match segment.as_index() {
                Some(i) => seq.get(i),
                None => seq.get_named(&segment.as_key()),
            },
            Self::Diff(_) | Self::Value(_) => None,
        }
    }

    /// The mutable direct child addressed by `segment`.
    pub fn child_mut(&mut self, segment: &PathSegment) -> Option<&mut Tree> {
        match self {
            Self::Object(map) => map.get_mut(&*segment.as_key()),
            Self::Array(seq) => match segment.as_index() {
                Some(i) => seq.get_mut(i),
                None => seq.get_named_mut(&segment.as_key()),
            },
            Self::Diff(_) | Self::Value(_) => None,
        }
    }

    /// The subtree at `path`. The empty path returns `self`.
    pub fn get(&self, path: &[PathSegment]) -> Option<&Tree> {
        path.iter().try_fold(self, |node, segment| node.child(segment))
    }

    /// The mutable subtree at `path`.
    pub fn get_mut(&mut self, path: &[PathSegment]) -> Option<&mut Tree> {
        path.iter().try_fold(self, |node, segment| node.child_mut(segment))
    }

    /// Number of diff nodes anywhere in the tree.
    pub fn diff_count(&self) -> usize {
        match self {
            Self::Diff(_) => 1,
            Self::Value(_) => 0,
            Self::Object(map) => map.values().map(Self::diff_count).sum(),
            Self::Array(seq) => seq.entries().map(|(_, t)| t.diff_count()).sum(),
        }
    }

    /// Materialize as plain JSON.
    ///
    /// Diff nodes become their bare lists and array holes become `null`,
    /// so the tagging is lost; use the tree itself when tags matter. Arrays
    /// that are not [list-shaped](SparseSeq::is_list_shaped) become objects
    /// keyed by decimal index and entry name.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Diff(node) => node.to_json(),
            Self::Value(value) => value.clone(),
            Self::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
            Self::Array(seq) if seq.is_list_shaped() => Value::Array(
                seq.slots()
                    .map(|slot| slot.map_or(Value::Null, Self::to_json))
                    .collect(),
            ),
            Self::Array(seq) => Value::Object(
                seq.entries()
                    .map(|(k, v)| (k, v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Diff(node) => node.serialize(serializer),
            Self::Value(value) => value.serialize(serializer),
            Self::Object(map) => map.serialize(serializer),
            Self::Array(seq) => seq.serialize(serializer),
        }
    }
}

impl From<DiffNode> for Tree {
    fn from(node: DiffNode) -> Self {
        Self::Diff(node)
    }
}

impl From<Value> for Tree {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Tree {
        let mut inner = BTreeMap::new();
        inner.insert("b".to_string(), Tree::Diff(DiffNode::add(json!(2))));
        let mut seq = SparseSeq::new();
        seq.insert(1, Tree::Diff(DiffNode::remove(Some(json!("x")))));
        inner.insert("list".to_string(), Tree::Array(seq));
        let mut root = BTreeMap::new();
        root.insert("a".to_string(), Tree::Object(inner));
        Tree::Object(root)
    }

    #[test]
    fn plain_list_is_not_a_diff() {
        let tagged = Tree::Diff(DiffNode::replace(Some(json!(1)), json!(2)));
        let plain = Tree::Value(json!([1, 2]));
        assert!(is_diff(&tagged));
        assert!(!is_diff(&plain));
        assert_eq!(tagged.to_json(), plain.to_json());
    }

    #[test]
    fn containers_are_not_diffs() {
        assert!(!is_diff(&Tree::object()));
        assert!(!is_diff(&Tree::array()));
        assert!(Tree::array().is_container());
        assert!(!Tree::Value(json!({})).is_container());
    }

    #[test]
    fn navigation_by_path() {
        let tree = sample();
        let b = tree.get(&["a".into(), "b".into()]).unwrap();
        assert_eq!(b.as_diff(), Some(&DiffNode::add(json!(2))));

        let removed = tree.get(&["a".into(), "list".into(), 1u64.into()]).unwrap();
        assert!(is_diff(removed));
        assert!(tree.get(&["a".into(), "list".into(), 0u64.into()]).is_none());
        assert!(tree.get(&["a".into(), "b".into(), "deeper".into()]).is_none());
        assert_eq!(tree.get(&[]), Some(&tree));
    }

    #[test]
    fn string_indices_reach_array_slots() {
        let tree = sample();
        assert!(tree.get(&["a".into(), "list".into(), "1".into()]).is_some());
    }

    #[test]
    fn get_mut_allows_in_place_edit() {
        let mut tree = sample();
        *tree.get_mut(&["a".into(), "b".into()]).unwrap() = Tree::Value(json!(null));
        assert_eq!(tree.diff_count(), 1);
    }

    #[test]
    fn json_materialization() {
        let tree = sample();
        assert_eq!(
            tree.to_json(),
            json!({"a": {"b": [2], "list": [null, ["x", 0, 0]]}})
        );
        assert_eq!(serde_json::to_value(&tree).unwrap(), tree.to_json());
    }

    #[test]
    fn named_entries_on_arrays() {
        let mut seq = SparseSeq::new();
        seq.insert(0, Tree::Diff(DiffNode::replace(Some(json!("bar")), json!("baz"))));
        seq.insert_named("length", Tree::Diff(DiffNode::replace(Some(json!(2)), json!(1))));
        let tree = Tree::Array(seq);

        let length = tree.get(&["length".into()]).unwrap();
        assert!(is_diff(length));
        assert!(tree.get(&[0u64.into()]).is_some());
        assert_eq!(tree.diff_count(), 2);
        assert_eq!(
            tree.to_json(),
            json!({"0": ["bar", "baz"], "length": [2, 1]})
        );
        assert_eq!(serde_json::to_value(&tree).unwrap(), tree.to_json());
    }

    #[test]
    fn counts_diffs() {
        assert_eq!(sample().diff_count(), 2);
        assert_eq!(Tree::Value(json!([1, 2])).diff_count(), 0);
    }
}
