//! Folding patches and a previous state into diff trees.
//!
//! For every patch the resolver looks up the old value in the previous
//! state, wraps old and new in a tagged [`DiffNode`], and places the node at
//! the patch path with [`build`]. Old values are always read from the
//! previous state, never from nodes produced earlier in the same call, so
//! patches do not depend on each other.

use std::borrow::Cow;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, trace};

use patchdiff_tree::{build, Tree};
use patchdiff_types::{DiffNode, Patch, PatchOp};

use crate::batch::PatchBatch;
use crate::config::{Accumulation, DiffConfig};
use crate::lookup::try_get;

/// What a resolution produces: one tree, or one tree per patch.
#[derive(Clone, Debug, PartialEq)]
pub enum DiffOutput {
    Tree(Tree),
    List(Vec<Tree>),
}

impl DiffOutput {
    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Tree]> {
        match self {
            Self::Tree(_) => None,
            Self::List(trees) => Some(trees),
        }
    }

    pub fn into_tree(self) -> Option<Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::List(_) => None,
        }
    }

    pub fn into_list(self) -> Option<Vec<Tree>> {
        match self {
            Self::Tree(_) => None,
            Self::List(trees) => Some(trees),
        }
    }

    /// Materialize as plain JSON (tags are lost).
    pub fn to_json(&self) -> Value {
        match self {
            Self::Tree(tree) => tree.to_json(),
            Self::List(trees) => Value::Array(trees.iter().map(Tree::to_json).collect()),
        }
    }
}

impl Serialize for DiffOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Tree(tree) => tree.serialize(serializer),
            Self::List(trees) => trees.serialize(serializer),
        }
    }
}

/// Resolves typed patch batches against a previous state.
#[derive(Clone, Debug, Default)]
pub struct Resolver {
    config: DiffConfig,
}

impl Resolver {
    pub fn new(config: DiffConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Build the diff output for `batch` against `previous`.
    ///
    /// Returns `None` for an empty batch. A batch holding exactly one
    /// root-path patch yields the `[previous, new]` pair with no nesting.
    pub fn resolve(&self, batch: &PatchBatch, previous: &Value) -> Option<DiffOutput> {
        let patches = batch.patches();
        if patches.is_empty() {
            return None;
        }
        let policy = self.config.accumulation;
        debug!(patches = patches.len(), ?policy, "resolving patch batch");

        if let [patch] = patches {
            if patch.is_root() {
                debug!(op = %patch.op, "replacing entire state");
                let node = Tree::Diff(DiffNode::replace(
                    Some(previous.clone()),
                    patch.new_value(),
                ));
                return Some(match policy {
                    Accumulation::PerPatch if batch.was_list() => DiffOutput::List(vec![node]),
                    _ => DiffOutput::Tree(node),
                });
            }
        }

        let output = match policy {
            Accumulation::Merged => patches
                .iter()
                .fold(None, |seed, patch| {
                    Some(build(&patch.path, Tree::Diff(node_for(patch, previous)), seed))
                })
                .map(DiffOutput::Tree),
            Accumulation::PerPatch => {
                let trees: Vec<Tree> = patches
                    .iter()
                    .map(|patch| build(&patch.path, Tree::Diff(node_for(patch, previous)), None))
                    .collect();
                if trees.len() == 1 && !batch.was_list() {
                    trees.into_iter().next().map(DiffOutput::Tree)
                } else {
                    Some(DiffOutput::List(trees))
                }
            }
        };

        debug!(?policy, "patch batch resolved");
        output
    }
}

/// The tagged node recording one patch.
fn node_for(patch: &Patch, previous: &Value) -> DiffNode {
    let node = match patch.op {
        PatchOp::Add => DiffNode::add(patch.new_value()),
        PatchOp::Replace => DiffNode::replace(
            try_get(previous, &patch.path).map(Cow::into_owned),
            patch.new_value(),
        ),
        PatchOp::Remove => DiffNode::remove(try_get(previous, &patch.path).map(Cow::into_owned)),
    };
    trace!(
        op = %patch.op,
        path = ?patch.path,
        had_old = node.old().is_some(),
        "resolved patch"
    );
    node
}
