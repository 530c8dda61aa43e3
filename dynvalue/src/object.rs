//! Object (map) value type.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::{self, Debug, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::FromIterator;
use std::collections::HashMap;

use indexmap::IndexMap;

use crate::value::Value;

/// An object (map) value.
///
/// `VObject` maps unique string keys to `Value`s and preserves insertion
/// order. Replacing the value of an existing key keeps its position.
///
/// Comparison and hashing ignore insertion order: two objects are equal when
/// they hold the same entries.
#[derive(Clone, Default)]
pub struct VObject {
    entries: IndexMap<String, Value>,
}

impl VObject {
    /// Creates a new empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new object with the specified capacity.
    #[must_use]
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(cap),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the object is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Gets a mutable value by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Returns `true` if the object contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a key-value pair, returning the previous value for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Clears the object.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    /// Returns an iterator over values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.entries.values()
    }

    /// Returns an iterator over entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Returns an iterator over entries with mutable values.
    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.entries.iter_mut()
    }

    /// Entries sorted by key; the basis for comparison and hashing.
    fn sorted_entries(&self) -> Vec<(&String, &Value)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

// === Iteration ===

impl IntoIterator for VObject {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a VObject {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut VObject {
    type Item = (&'a String, &'a mut Value);
    type IntoIter = indexmap::map::IterMut<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

// === Comparison ===

impl PartialEq for VObject {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for VObject {}

impl PartialOrd for VObject {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VObject {
    /// Key-wise: entries are compared in key order, then by length.
    fn cmp(&self, other: &Self) -> Ordering {
        self.sorted_entries().cmp(&other.sorted_entries())
    }
}

impl Hash for VObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self.sorted_entries() {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl Debug for VObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// === FromIterator / Extend ===

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for VObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut obj = VObject::with_capacity(lower);
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for VObject {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

// === From implementations ===

impl From<IndexMap<String, Value>> for VObject {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for VObject {
    fn from(map: HashMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for VObject {
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}
