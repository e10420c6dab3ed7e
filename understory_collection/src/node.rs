// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flattened node form stored by a [`Collection`](crate::Collection).

use alloc::string::String;

/// Distinguishes a selectable leaf from a non-selectable grouping container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A selectable leaf entry.
    Item,
    /// A grouping container. Sections never carry an item index and are never
    /// selectable themselves.
    Section,
}

/// One entry (item or section) in the ordered collection.
///
/// Nodes are produced once per [`Collection`](crate::Collection) construction
/// and are immutable afterwards. The `prev_key`/`next_key`/`parent_key` fields
/// are lookups into the owning collection's key map — plain key values, never
/// pointers into other nodes — so collections remain trivially clonable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionNode<K> {
    /// Unique, stable identifier for this entry.
    pub key: K,
    /// Whether this node is an item or a section.
    pub kind: NodeKind,
    /// Position among item nodes in traversal order: 0-based and contiguous
    /// across items. Always `None` for sections.
    pub index: Option<usize>,
    /// Plain-text value of the entry, used by hosts for typeahead and
    /// accessibility labelling.
    pub text_value: String,
    /// Key of the previous node in traversal order, across all node kinds.
    pub prev_key: Option<K>,
    /// Key of the next node in traversal order, across all node kinds.
    pub next_key: Option<K>,
    /// Key of the enclosing section, or `None` for top-level nodes.
    pub parent_key: Option<K>,
}

impl<K> CollectionNode<K> {
    /// Returns `true` if this node is a selectable item.
    #[must_use]
    pub fn is_item(&self) -> bool {
        matches!(self.kind, NodeKind::Item)
    }
}
