// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered, keyed collection.

use alloc::vec::Vec;
use core::hash::Hash;
use hashbrown::HashMap;

use crate::builder::{BuildError, SourceNode, flatten};
use crate::node::CollectionNode;

/// An immutable, ordered, keyed view over one rendering of a data source.
///
/// A `Collection` owns the full node set produced by a single flattening pass
/// over host-supplied [`SourceNode`]s. It is never patched in place: when the
/// source changes, the host builds a new `Collection`.
///
/// Lookup by key is O(1); ordered traversal is available both by iterating the
/// collection and by stepping through `key_before`/`key_after`, which follow
/// the `prev_key`/`next_key` links recorded at construction.
#[derive(Clone, Debug)]
pub struct Collection<K> {
    /// Emission order of all node keys, sections included.
    order: Vec<K>,
    nodes: HashMap<K, CollectionNode<K>>,
    item_count: usize,
}

impl<K> Collection<K> {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            nodes: HashMap::new(),
            item_count: 0,
        }
    }
}

impl<K> Default for Collection<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash> Collection<K> {
    /// Builds a collection from an ordered sequence of source nodes.
    ///
    /// Sections are emitted before their children in depth-first order. Item
    /// indices are assigned by a single running counter across the whole
    /// flattened sequence; sections never consume an index.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateKey`] if two source records share a key.
    pub fn from_source(source: &[SourceNode<K>]) -> Result<Self, BuildError<K>> {
        Self::build(flatten(source, None))
    }

    /// Builds a collection like [`Collection::from_source`], retaining only
    /// source nodes accepted by `filter`.
    ///
    /// Rejecting a section drops its entire subtree. Filtering happens before
    /// index assignment, so item indices stay contiguous.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateKey`] if two retained records share a key.
    pub fn from_source_filtered(
        source: &[SourceNode<K>],
        filter: &dyn Fn(&SourceNode<K>) -> bool,
    ) -> Result<Self, BuildError<K>> {
        Self::build(flatten(source, Some(filter)))
    }

    fn build(flat: Vec<CollectionNode<K>>) -> Result<Self, BuildError<K>> {
        let mut order = Vec::with_capacity(flat.len());
        let mut nodes = HashMap::with_capacity(flat.len());
        let mut item_count = 0;
        for node in flat {
            if node.is_item() {
                item_count += 1;
            }
            order.push(node.key.clone());
            if nodes.insert(node.key.clone(), node).is_some() {
                let key = order.pop().expect("key was just pushed");
                return Err(BuildError::DuplicateKey(key));
            }
        }
        Ok(Self {
            order,
            nodes,
            item_count,
        })
    }

    /// Total number of nodes, sections included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the collection holds no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of item nodes. A collection that only holds sections has no
    /// selectable items even though it is not empty.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Looks up a node by key. O(1).
    #[must_use]
    pub fn node(&self, key: &K) -> Option<&CollectionNode<K>> {
        self.nodes.get(key)
    }

    /// Looks up an item node by key, returning `None` for sections and
    /// unknown keys.
    #[must_use]
    pub fn item(&self, key: &K) -> Option<&CollectionNode<K>> {
        self.nodes.get(key).filter(|n| n.is_item())
    }

    /// Returns `true` if a node with this key exists.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    /// Key of the first node in traversal order.
    #[must_use]
    pub fn first_key(&self) -> Option<&K> {
        self.order.first()
    }

    /// Key of the last node in traversal order.
    #[must_use]
    pub fn last_key(&self) -> Option<&K> {
        self.order.last()
    }

    /// Key of the node preceding `key` in traversal order, across all node
    /// kinds. Callers that only want items must skip sections themselves.
    #[must_use]
    pub fn key_before(&self, key: &K) -> Option<&K> {
        self.nodes.get(key).and_then(|n| n.prev_key.as_ref())
    }

    /// Key of the node following `key` in traversal order, across all node
    /// kinds. Callers that only want items must skip sections themselves.
    #[must_use]
    pub fn key_after(&self, key: &K) -> Option<&K> {
        self.nodes.get(key).and_then(|n| n.next_key.as_ref())
    }

    /// Iterates all nodes in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &CollectionNode<K>> {
        self.order.iter().map(|k| &self.nodes[k])
    }

    /// Iterates node keys in traversal order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Iterates item nodes only, in index order.
    pub fn items(&self) -> impl Iterator<Item = &CollectionNode<K>> {
        self.iter().filter(|n| n.is_item())
    }
}
