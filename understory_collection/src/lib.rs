// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collection --heading-base-level=0

//! Understory Collection: an ordered, keyed view over host-supplied data.
//!
//! This crate provides an immutable, ordered collection abstraction for list-like
//! UI surfaces (listboxes, menus, grids of options). A [`Collection`] is built once
//! from a sequence of [`SourceNode`]s describing items and sections, and is treated
//! as immutable afterwards: when the host's data changes, it constructs a new
//! `Collection` rather than patching the old one.
//!
//! The core concepts are:
//!
//! - [`SourceNode`]: the host-facing description of one entry — a selectable item
//!   or a grouping section with child entries.
//! - [`CollectionNode`]: the flattened, linked form stored by the collection, with
//!   a positional `index` on items and `prev_key`/`next_key`/`parent_key` links
//!   expressed as plain key values (lookups, never ownership).
//! - [`Collection`]: the owner of the full node set for one rendering of the data
//!   source, with O(1) lookup by key and ordered traversal helpers.
//!
//! Keys are a generic parameter `K`, so hosts can use any clonable, hashable
//! handle: interned strings, integers, or an application-specific id type.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_collection::{Collection, SourceNode};
//!
//! let collection = Collection::from_source(&[
//!     SourceNode::item("apple", "Apple"),
//!     SourceNode::section(
//!         "citrus",
//!         "Citrus",
//!         vec![
//!             SourceNode::item("lemon", "Lemon"),
//!             SourceNode::item("lime", "Lime"),
//!         ],
//!     ),
//!     SourceNode::item("pear", "Pear"),
//! ])
//! .unwrap();
//!
//! // Sections do not consume item indices.
//! assert_eq!(collection.item(&"lemon").unwrap().index, Some(1));
//! assert_eq!(collection.item(&"pear").unwrap().index, Some(3));
//!
//! // Traversal order includes section nodes; callers that only care about
//! // items can skip by node kind.
//! assert_eq!(collection.first_key(), Some(&"apple"));
//! assert_eq!(collection.key_after(&"apple"), Some(&"citrus"));
//! assert_eq!(collection.key_after(&"citrus"), Some(&"lemon"));
//! ```
//!
//! Duplicate keys in the source are a construction error, reported as
//! [`BuildError::DuplicateKey`] rather than silently deduplicated.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;
mod collection;
mod node;

pub use builder::{BuildError, SourceNode, disabled_keys};
pub use collection::Collection;
pub use node::{CollectionNode, NodeKind};
