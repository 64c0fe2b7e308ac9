//! Sparse sequences: arrays whose unassigned slots are genuinely absent.
//!
//! Assigning index `n` into an empty [`SparseSeq`] grows its length to
//! `n + 1` without creating slots `0..n`. Iteration skips holes; only
//! [`SparseSeq::slots`] and serialization surface them (as `None`/`null`).
//!
//! Like a script array, a sequence can also carry named entries next to
//! its slots (`length` is the usual one). Those never affect `len`.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Most holes a sequence may have and still materialize as a list.
pub const MAX_MATERIALIZED_HOLES: usize = 1 << 16;

/// An index-addressed sequence permitting holes, plus named entries.
///
/// # Invariants
///
/// - `len` is one past the highest index ever assigned, and never shrinks
///   on removal (matching array deletion, which leaves a hole).
/// - Every key in `items` is `< len`.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseSeq<T> {
    items: BTreeMap<usize, T>,
    named: BTreeMap<String, T>,
    len: usize,
}

impl<T> Default for SparseSeq<T> {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            named: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<T> SparseSeq<T> {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Length including holes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no index was ever assigned.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.items.len()
    }

    /// Number of holes below `len`.
    pub fn holes(&self) -> usize {
        self.len - self.items.len()
    }

    /// Returns `true` if `index` holds a value.
    pub fn contains(&self, index: usize) -> bool {
        self.items.contains_key(&index)
    }

    /// Store `value` at `index`, returning the previous occupant.
    pub fn insert(&mut self, index: usize, value: T) -> Option<T> {
        self.len = self.len.max(index.saturating_add(1));
        self.items.insert(index, value)
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(&index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(&index)
    }

    /// Take the value out of `index`, leaving a hole. The length is unchanged.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.items.remove(&index)
    }

    /// Store a named entry, returning the previous one.
    pub fn insert_named(&mut self, key: impl Into<String>, value: T) -> Option<T> {
        self.named.insert(key.into(), value)
    }

    pub fn get_named(&self, key: &str) -> Option<&T> {
        self.named.get(key)
    }

    pub fn get_named_mut(&mut self, key: &str) -> Option<&mut T> {
        self.named.get_mut(key)
    }

    pub fn remove_named(&mut self, key: &str) -> Option<T> {
        self.named.remove(key)
    }

    /// Named entries in key order.
    pub fn named(&self) -> impl Iterator<Item = (&str, &T)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items.iter().map(|(&i, v)| (i, v))
    }

    /// Every slot up to `len`, holes included as `None`. Lazy.
    pub fn slots(&self) -> impl Iterator<Item = Option<&T>> {
        (0..self.len).map(move |i| self.items.get(&i))
    }

    /// Whether the sequence materializes as a plain list.
    ///
    /// False when it carries named entries or more than
    /// [`MAX_MATERIALIZED_HOLES`] holes; such sequences materialize as a
    /// mapping from decimal index (then name) to value instead.
    pub fn is_list_shaped(&self) -> bool {
        self.named.is_empty() && self.holes() <= MAX_MATERIALIZED_HOLES
    }

    /// Occupied slots and named entries, keyed the way a mapping would key them.
    pub fn entries(&self) -> impl Iterator<Item = (String, &T)> {
        self.iter()
            .map(|(i, v)| (i.to_string(), v))
            .chain(self.named.iter().map(|(k, v)| (k.clone(), v)))
    }
}

impl<T> FromIterator<(usize, T)> for SparseSeq<T> {
    fn from_iter<I: IntoIterator<Item = (usize, T)>>(iter: I) -> Self {
        let mut seq = Self::new();
        for (i, v) in iter {
            seq.insert(i, v);
        }
        seq
    }
}

impl<T: Serialize> Serialize for SparseSeq<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_list_shaped() {
            let mut seq = serializer.serialize_seq(Some(self.len))?;
            for slot in self.slots() {
                seq.serialize_element(&slot)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.items.len() + self.named.len()))?;
            for (key, value) in self.entries() {
                map.serialize_entry(&key, value)?;
            }
            map.end()
        }
    }
}
