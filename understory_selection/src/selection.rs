// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection value: a key set with range-gesture endpoints.

use core::hash::Hash;
use hashbrown::HashSet;

/// A set of selected keys plus the endpoints of the most recent range gesture.
///
/// `anchor_key` is the fixed end of a shift-click/shift-arrow range; `current_key`
/// is the moving end. Non-range operations (toggle, replace, programmatic set)
/// keep both equal to the acted-upon key.
#[derive(Clone, Debug)]
pub struct Selection<K> {
    keys: HashSet<K>,
    anchor_key: Option<K>,
    current_key: Option<K>,
}

impl<K> Selection<K> {
    /// Creates an empty selection with no range endpoints.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: HashSet::new(),
            anchor_key: None,
            current_key: None,
        }
    }

    /// Number of selected keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no keys are selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The fixed end of the most recent range gesture, if any.
    #[must_use]
    pub fn anchor_key(&self) -> Option<&K> {
        self.anchor_key.as_ref()
    }

    /// The moving end of the most recent range gesture, if any.
    #[must_use]
    pub fn current_key(&self) -> Option<&K> {
        self.current_key.as_ref()
    }

    /// Iterates the selected keys in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Creates a singleton selection with anchor and current both set to `key`.
    #[must_use]
    pub fn single(key: K) -> Self {
        let mut keys = HashSet::with_capacity(1);
        keys.insert(key.clone());
        Self {
            keys,
            anchor_key: Some(key.clone()),
            current_key: Some(key),
        }
    }

    /// Creates a selection from a sequence of keys, with no range endpoints.
    pub fn from_keys<I: IntoIterator<Item = K>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            anchor_key: None,
            current_key: None,
        }
    }

    /// Inserts a key. Returns `true` if it was not already selected.
    pub fn insert(&mut self, key: K) -> bool {
        self.keys.insert(key)
    }

    /// Removes a key. Returns `true` if it was selected.
    pub fn remove(&mut self, key: &K) -> bool {
        self.keys.remove(key)
    }

    /// Returns `true` if `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// Sets both range endpoints.
    pub fn set_endpoints(&mut self, anchor_key: Option<K>, current_key: Option<K>) {
        self.anchor_key = anchor_key;
        self.current_key = current_key;
    }

    /// Compares key membership only, ignoring range endpoints: size check,
    /// then full cross-check in both directions.
    #[must_use]
    pub fn same_keys(&self, other: &HashSet<K>) -> bool {
        self.keys.len() == other.len()
            && self.keys.iter().all(|k| other.contains(k))
            && other.iter().all(|k| self.keys.contains(k))
    }
}

impl<K: Eq + Hash> PartialEq for Selection<K> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
            && self.anchor_key == other.anchor_key
            && self.current_key == other.current_key
    }
}

impl<K: Eq + Hash> Eq for Selection<K> {}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash> FromIterator<K> for Selection<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

/// The raw selection value: either a materialized [`Selection`] or the
/// "select all" sentinel.
///
/// `All` means "every selectable key is selected" without materializing the
/// set; it is expanded lazily when enumeration is required (see
/// [`SelectionManager::select_all_keys`](crate::SelectionManager::select_all_keys)).
#[derive(Clone, Debug)]
pub enum SelectedKeys<K> {
    /// Every selectable key is selected.
    All,
    /// An explicit set of selected keys.
    Set(Selection<K>),
}

impl<K: Eq + Hash> PartialEq for SelectedKeys<K> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::All, Self::All) => true,
            (Self::Set(a), Self::Set(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Eq + Hash> Eq for SelectedKeys<K> {}

impl<K> SelectedKeys<K> {
    /// Creates an empty materialized selection.
    #[must_use]
    pub fn empty() -> Self {
        Self::Set(Selection::new())
    }

    /// Returns `true` if this is the `All` sentinel.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Returns `true` if this is a materialized selection with no keys.
    /// `All` is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::All => false,
            Self::Set(selection) => selection.is_empty(),
        }
    }
}

impl<K> Default for SelectedKeys<K> {
    fn default() -> Self {
        Self::empty()
    }
}
