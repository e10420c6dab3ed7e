// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explicit selection state with change notification.
//!
//! This replaces the fine-grained reactive signals a UI framework would use
//! with a plain state record, an epoch counter for cache invalidation, and
//! optional change callbacks invoked synchronously on commit.

use alloc::boxed::Box;
use core::fmt;
use core::hash::Hash;
use hashbrown::HashSet;

use crate::selection::SelectedKeys;

/// Whether 0, 1, or many keys may be selected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// Selection is disabled; every query is `false` and every mutation a no-op.
    #[default]
    None,
    /// At most one key may be selected.
    Single,
    /// Any number of keys may be selected, including the `All` sentinel.
    Multiple,
}

/// How a plain (unmodified) selection gesture affects the selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionBehavior {
    /// A plain gesture toggles the key's membership, keeping the rest.
    #[default]
    Toggle,
    /// A plain gesture replaces the whole selection with the key.
    Replace,
}

/// What being in the disabled-key set excludes a key from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisabledBehavior {
    /// Disabled keys cannot be selected, but still allow actions and focus.
    Selection,
    /// Disabled keys are excluded from all interaction, select-all expansion
    /// included.
    #[default]
    All,
}

/// Which edge child receives focus when focus enters a sub-tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusStrategy {
    /// Focus the first child.
    #[default]
    First,
    /// Focus the last child.
    Last,
}

/// Callback invoked after a committed change to the raw selection value.
pub type SelectionCallback<K> = Box<dyn FnMut(&SelectedKeys<K>)>;

/// Callback invoked after a committed change to the focused key.
pub type FocusCallback<K> = Box<dyn FnMut(Option<&K>)>;

/// Initial configuration for a [`SelectionState`].
///
/// Plain data with public fields; unspecified fields take their defaults
/// (mode [`SelectionMode::None`], behavior [`SelectionBehavior::Toggle`],
/// empty selection allowed, disabled behavior [`DisabledBehavior::All`]).
#[derive(Clone, Debug, Default)]
pub struct SelectionOptions<K> {
    /// Selection mode. Fixed for the lifetime of the state.
    pub selection_mode: SelectionMode,
    /// Initial selection behavior. Mutable later (for example, a touch
    /// long-press switching replace to toggle).
    pub selection_behavior: SelectionBehavior,
    /// If `true`, operations that would empty the selection are no-ops.
    pub disallow_empty_selection: bool,
    /// What disabled keys are excluded from.
    pub disabled_behavior: DisabledBehavior,
    /// Keys excluded from selection (and possibly all interaction).
    pub disabled_keys: HashSet<K>,
    /// Initially selected keys.
    pub default_selected: SelectedKeys<K>,
}

/// The minimal persisted selection state.
///
/// One instance lives per list-state; the [`SelectionManager`] borrows it
/// together with a collection to answer queries and apply mutations. Setters
/// suppress no-op updates: callbacks fire only when the stored value actually
/// changes. The single-select facade layers always-notify semantics on top
/// where the UI contract requires it.
///
/// [`SelectionManager`]: crate::SelectionManager
pub struct SelectionState<K> {
    selection_mode: SelectionMode,
    selection_behavior: SelectionBehavior,
    disallow_empty_selection: bool,
    selected: SelectedKeys<K>,
    disabled_keys: HashSet<K>,
    disabled_behavior: DisabledBehavior,
    is_focused: bool,
    focused_key: Option<K>,
    child_focus_strategy: FocusStrategy,
    /// Bumped on every committed change to `selected`. Consumers key caches
    /// (such as the manager's select-all memo) off this value.
    epoch: u64,
    on_selection_change: Option<SelectionCallback<K>>,
    on_focus_change: Option<FocusCallback<K>>,
}

impl<K: fmt::Debug> fmt::Debug for SelectionState<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionState")
            .field("selection_mode", &self.selection_mode)
            .field("selection_behavior", &self.selection_behavior)
            .field("disallow_empty_selection", &self.disallow_empty_selection)
            .field("selected", &self.selected)
            .field("disabled_keys", &self.disabled_keys)
            .field("disabled_behavior", &self.disabled_behavior)
            .field("is_focused", &self.is_focused)
            .field("focused_key", &self.focused_key)
            .field("child_focus_strategy", &self.child_focus_strategy)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl<K: Clone + Eq + Hash> SelectionState<K> {
    /// Creates a new state from the given options.
    #[must_use]
    pub fn new(options: SelectionOptions<K>) -> Self {
        Self {
            selection_mode: options.selection_mode,
            selection_behavior: options.selection_behavior,
            disallow_empty_selection: options.disallow_empty_selection,
            selected: options.default_selected,
            disabled_keys: options.disabled_keys,
            disabled_behavior: options.disabled_behavior,
            is_focused: false,
            focused_key: None,
            child_focus_strategy: FocusStrategy::First,
            epoch: 0,
            on_selection_change: None,
            on_focus_change: None,
        }
    }

    /// Registers the callback invoked after each committed selection change.
    pub fn set_on_selection_change(&mut self, callback: Option<SelectionCallback<K>>) {
        self.on_selection_change = callback;
    }

    /// Registers the callback invoked after each committed focused-key change.
    pub fn set_on_focus_change(&mut self, callback: Option<FocusCallback<K>>) {
        self.on_focus_change = callback;
    }

    /// The selection mode. Never mutated after construction.
    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// The current selection behavior.
    #[must_use]
    pub fn selection_behavior(&self) -> SelectionBehavior {
        self.selection_behavior
    }

    /// Sets the selection behavior.
    pub fn set_selection_behavior(&mut self, behavior: SelectionBehavior) {
        self.selection_behavior = behavior;
    }

    /// Whether operations that would empty the selection are no-ops.
    #[must_use]
    pub fn disallow_empty_selection(&self) -> bool {
        self.disallow_empty_selection
    }

    /// The raw selection value.
    #[must_use]
    pub fn selected(&self) -> &SelectedKeys<K> {
        &self.selected
    }

    /// Commits a new raw selection value.
    ///
    /// No-op updates are suppressed: when `selected` equals the stored value
    /// nothing changes, the epoch stays put, and no callback fires. Returns
    /// `true` if the value changed.
    pub fn set_selected(&mut self, selected: SelectedKeys<K>) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        self.epoch = self.epoch.wrapping_add(1);
        if let Some(callback) = self.on_selection_change.as_mut() {
            callback(&self.selected);
        }
        true
    }

    /// Re-invokes the selection callback with the current value, without
    /// changing anything. Used by facades that must notify on user actions
    /// even when the resulting value is unchanged.
    pub(crate) fn notify_selection(&mut self) {
        if let Some(callback) = self.on_selection_change.as_mut() {
            callback(&self.selected);
        }
    }

    /// Monotonically increasing version of the raw selection value.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Keys excluded from selection (and possibly all interaction).
    #[must_use]
    pub fn disabled_keys(&self) -> &HashSet<K> {
        &self.disabled_keys
    }

    /// Replaces the disabled-key set. The list-state facade calls this when a
    /// rebuilt source changes which items are disabled.
    pub fn set_disabled_keys(&mut self, disabled_keys: HashSet<K>) {
        self.disabled_keys = disabled_keys;
    }

    /// What disabled keys are excluded from.
    #[must_use]
    pub fn disabled_behavior(&self) -> DisabledBehavior {
        self.disabled_behavior
    }

    /// Whether the collection as a whole has focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// Sets whether the collection as a whole has focus.
    pub fn set_focused(&mut self, is_focused: bool) {
        self.is_focused = is_focused;
    }

    /// The key of the currently focused item, if any.
    #[must_use]
    pub fn focused_key(&self) -> Option<&K> {
        self.focused_key.as_ref()
    }

    /// The edge-child strategy recorded with the last focus move.
    #[must_use]
    pub fn child_focus_strategy(&self) -> FocusStrategy {
        self.child_focus_strategy
    }

    /// Sets the focused key and the strategy to use when focus enters a
    /// sub-tree. This state-level setter does not validate the key against
    /// any collection; use the manager's setter for that.
    pub fn set_focused_key(&mut self, key: Option<K>, strategy: FocusStrategy) {
        self.child_focus_strategy = strategy;
        if self.focused_key == key {
            return;
        }
        self.focused_key = key;
        if let Some(callback) = self.on_focus_change.as_mut() {
            callback(self.focused_key.as_ref());
        }
    }
}
