// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-facing source description and the flattening pass.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use crate::node::{CollectionNode, NodeKind};

/// A host-supplied record describing one entry of the data source.
///
/// Hosts map their own data records into `SourceNode`s (the Rust rendering of
/// per-record accessor functions) and hand an ordered sequence of them to
/// [`Collection::from_source`](crate::Collection::from_source).
#[derive(Clone, Debug)]
pub enum SourceNode<K> {
    /// A selectable item.
    Item {
        /// Unique, stable key for the item.
        key: K,
        /// Plain-text value, used for typeahead and labelling.
        text_value: String,
        /// Whether the item starts out disabled. Disabled keys can be fed into
        /// the selection layer via [`disabled_keys`].
        disabled: bool,
    },
    /// A grouping section containing child entries.
    Section {
        /// Unique, stable key for the section.
        key: K,
        /// Plain-text heading of the section.
        text_value: String,
        /// Child entries, emitted directly after the section in traversal
        /// order. Sections may nest.
        children: Vec<SourceNode<K>>,
    },
}

impl<K> SourceNode<K> {
    /// Creates an enabled item node.
    pub fn item(key: K, text_value: impl Into<String>) -> Self {
        Self::Item {
            key,
            text_value: text_value.into(),
            disabled: false,
        }
    }

    /// Creates a disabled item node.
    pub fn disabled_item(key: K, text_value: impl Into<String>) -> Self {
        Self::Item {
            key,
            text_value: text_value.into(),
            disabled: true,
        }
    }

    /// Creates a section node with the given children.
    pub fn section(key: K, text_value: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Section {
            key,
            text_value: text_value.into(),
            children,
        }
    }

    /// Returns the key of this source node.
    pub fn key(&self) -> &K {
        match self {
            Self::Item { key, .. } | Self::Section { key, .. } => key,
        }
    }
}

/// Error produced when the source data violates a construction invariant.
///
/// Construction-time misuse is a programmer error and fails fast; it is never
/// silently repaired.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError<K> {
    /// Two source records share the same key. Keys must be unique across the
    /// whole collection, sections included.
    DuplicateKey(K),
}

impl<K: fmt::Debug> fmt::Display for BuildError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(f, "duplicate collection key: {key:?}"),
        }
    }
}

impl<K: fmt::Debug> core::error::Error for BuildError<K> {}

/// Collects the keys of all items marked `disabled` in the source, in
/// traversal order, descending into sections.
///
/// Hosts typically feed the result into the selection layer's disabled-key
/// set when (re)building list state.
pub fn disabled_keys<K: Clone>(source: &[SourceNode<K>]) -> Vec<K> {
    let mut keys = Vec::new();
    collect_disabled(source, &mut keys);
    keys
}

fn collect_disabled<K: Clone>(source: &[SourceNode<K>], out: &mut Vec<K>) {
    for node in source {
        match node {
            SourceNode::Item { key, disabled, .. } => {
                if *disabled {
                    out.push(key.clone());
                }
            }
            SourceNode::Section { children, .. } => collect_disabled(children, out),
        }
    }
}

/// Flattens the source into emission order, assigning item indices and parent
/// links. Filtered-out nodes (and, for sections, their entire subtree) are
/// skipped before any index is assigned.
pub(crate) fn flatten<K: Clone + Eq + Hash>(
    source: &[SourceNode<K>],
    filter: Option<&dyn Fn(&SourceNode<K>) -> bool>,
) -> Vec<CollectionNode<K>> {
    let mut out = Vec::new();
    let mut next_index = 0_usize;
    flatten_into(source, filter, None, &mut next_index, &mut out);

    // Link prev/next in emission order across all nodes, sections included.
    let keys: Vec<K> = out.iter().map(|n| n.key.clone()).collect();
    for (i, node) in out.iter_mut().enumerate() {
        node.prev_key = (i > 0).then(|| keys[i - 1].clone());
        node.next_key = keys.get(i + 1).cloned();
    }
    out
}

fn flatten_into<K: Clone + Eq + Hash>(
    source: &[SourceNode<K>],
    filter: Option<&dyn Fn(&SourceNode<K>) -> bool>,
    parent_key: Option<&K>,
    next_index: &mut usize,
    out: &mut Vec<CollectionNode<K>>,
) {
    for node in source {
        if let Some(filter) = filter
            && !filter(node)
        {
            continue;
        }
        match node {
            SourceNode::Item {
                key, text_value, ..
            } => {
                let index = *next_index;
                *next_index += 1;
                out.push(CollectionNode {
                    key: key.clone(),
                    kind: NodeKind::Item,
                    index: Some(index),
                    text_value: text_value.clone(),
                    prev_key: None,
                    next_key: None,
                    parent_key: parent_key.cloned(),
                });
            }
            SourceNode::Section {
                key,
                text_value,
                children,
            } => {
                out.push(CollectionNode {
                    key: key.clone(),
                    kind: NodeKind::Section,
                    index: None,
                    text_value: text_value.clone(),
                    prev_key: None,
                    next_key: None,
                    parent_key: parent_key.cloned(),
                });
                flatten_into(children, filter, Some(key), next_index, out);
            }
        }
    }
}
