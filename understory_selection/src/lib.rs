// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_selection --heading-base-level=0

//! Understory Selection: a selection state engine for keyed collections.
//!
//! This crate implements single/multiple/none selection over an
//! [`understory_collection::Collection`], including toggle vs. replace
//! behavior, contiguous range extension from an anchor key, a lazy
//! "select all" sentinel, and disabled-key semantics. It holds no rendering
//! or gesture logic: hosts resolve which key a press or key event targets and
//! call into the engine; the engine reports state back through plain queries
//! and optional change callbacks.
//!
//! The core concepts are:
//!
//! - [`Selection`]: a key set carrying the `anchor`/`current` endpoints of the
//!   most recent range gesture.
//! - [`SelectedKeys`]: either a materialized [`Selection`] or the [`All`]
//!   sentinel, which stands for "every selectable key" without materializing
//!   the set.
//! - [`SelectionState`]: the explicit state record — mode, behavior,
//!   disabled keys, focus sub-state — with change notification and a
//!   monotonically increasing epoch used for cache invalidation.
//! - [`SelectionManager`]: the algorithmic core. It borrows one collection and
//!   one state and exposes all queries and mutations; it owns no data itself.
//! - [`ListState`] / [`SingleSelectListState`]: facades that bind a data
//!   source to a collection, keep the focused key valid across rebuilds, and
//!   (for single select) project the selection down to one optional key.
//!
//! [`All`]: SelectedKeys::All
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_collection::{Collection, SourceNode};
//! use understory_selection::{
//!     SelectionManager, SelectionMode, SelectionOptions, SelectionState,
//! };
//!
//! let collection = Collection::from_source(&[
//!     SourceNode::item("a", "Apple"),
//!     SourceNode::item("b", "Banana"),
//!     SourceNode::item("c", "Cherry"),
//! ])
//! .unwrap();
//!
//! let mut state = SelectionState::new(SelectionOptions {
//!     selection_mode: SelectionMode::Multiple,
//!     ..Default::default()
//! });
//!
//! let mut manager = SelectionManager::new(&collection, &mut state);
//! manager.toggle_selection(&"a");
//! manager.extend_selection(&"c");
//! assert!(manager.is_selected(&"b"), "range extension covers b");
//! assert!(manager.is_select_all());
//! ```
//!
//! All mutations degrade to no-ops rather than failing when the mode is
//! [`SelectionMode::None`], when a key does not resolve to a selectable item,
//! or when the result would violate `disallow_empty_selection`. Stale keys are
//! a normal part of UI life and never crash the engine.
//!
//! Execution is single-threaded and synchronous. Change callbacks run inside
//! the mutation that committed them; re-entering the same state from within
//! its own callback is not supported.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod list;
mod manager;
mod selection;
mod state;

pub use list::{ListState, NodeFilter, SingleSelectListState};
pub use manager::{Pointer, SelectionManager};
pub use selection::{SelectedKeys, Selection};
pub use state::{
    DisabledBehavior, FocusStrategy, SelectionBehavior, SelectionMode, SelectionOptions,
    SelectionState,
};
