//! Building nested containers along a path.
//!
//! [`build`] places a leaf at a path, creating containers on the way down.
//! The kind of each new container is chosen by the segment used to enter
//! it: an index creates an array, a key creates an object. Containers that
//! already exist in the seed are extended and never converted, which is
//! what lets several paths merge into one shared tree.

use tracing::debug;

use patchdiff_types::PathSegment;

use crate::tree::Tree;

/// Place `leaf` at `path`, reusing `seed` as the outermost container when it is one.
///
/// The empty path returns `leaf` unchanged; root replacement is the
/// caller's concern. Array slots between existing entries and the new index
/// stay absent. A key that is not an array position (such as `length`, or
/// an index above [`MAX_ARRAY_INDEX`](patchdiff_types::MAX_ARRAY_INDEX))
/// becomes a named entry of the array. Building never fails: a seed that is
/// not a container is replaced by a fresh one.
pub fn build(path: &[PathSegment], leaf: Tree, seed: Option<Tree>) -> Tree {
    let Some((head, rest)) = path.split_first() else {
        return leaf;
    };

    let mut container = match seed {
        Some(tree) if tree.is_container() => tree,
        Some(_) => {
            debug!(segment = %head, "replacing leaf with container");
            container_for(head)
        }
        None => container_for(head),
    };

    let child = if rest.is_empty() {
        leaf
    } else {
        let existing = take_child(&mut container, head);
        build(rest, leaf, existing)
    };
    place(&mut container, head, child);

    container
}

fn container_for(segment: &PathSegment) -> Tree {
    if segment.is_index() {
        Tree::array()
    } else {
        Tree::object()
    }
}

fn take_child(container: &mut Tree, segment: &PathSegment) -> Option<Tree> {
    match container {
        Tree::Object(map) => map.remove(&*segment.as_key()),
        Tree::Array(seq) => match segment.as_index() {
            Some(i) => seq.remove(i),
            None => seq.remove_named(&segment.as_key()),
        },
        Tree::Diff(_) | Tree::Value(_) => None,
    }
}

fn place(container: &mut Tree, segment: &PathSegment, child: Tree) {
    match container {
        Tree::Object(map) => {
            map.insert(segment.as_key().into_owned(), child);
        }
        Tree::Array(seq) => {
            match segment.as_index() {
                Some(i) => seq.insert(i, child),
                None => {
                    debug!(segment = %segment, "storing named entry on array");
                    seq.insert_named(segment.as_key(), child)
                }
            };
        }
        Tree::Diff(_) | Tree::Value(_) => {}
    }
}
