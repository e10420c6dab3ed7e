// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selection manager: queries and mutations over one collection plus one
//! selection state.

use alloc::vec::Vec;
use core::hash::Hash;
use hashbrown::HashSet;
use smallvec::SmallVec;

use understory_collection::Collection;

use crate::selection::{SelectedKeys, Selection};
use crate::state::{
    DisabledBehavior, FocusStrategy, SelectionBehavior, SelectionMode, SelectionState,
};

/// Kind of pointer that originated a selection gesture.
///
/// Hosts pass this through from their input layer so the engine can apply
/// platform conventions (touch and virtual pointers always toggle in multiple
/// mode, rather than replacing the selection).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pointer {
    /// A mouse or trackpad pointer.
    Mouse,
    /// A touch contact.
    Touch,
    /// A pen/stylus contact.
    Pen,
    /// A keyboard-driven activation.
    Keyboard,
    /// A virtual pointer, e.g. from assistive technology.
    Virtual,
}

/// The algorithmic core of the selection engine.
///
/// A manager owns no data: it borrows one immutable [`Collection`] and one
/// mutable [`SelectionState`] and computes everything from those two. Hosts
/// typically construct a fresh manager per interaction (the list-state facade
/// hands one out on demand); the select-all memo is keyed off the state's
/// epoch, so reusing a manager across mutations stays correct.
///
/// All mutations are no-ops when the mode is [`SelectionMode::None`], when the
/// target key does not resolve to a selectable item, or when the result would
/// violate `disallow_empty_selection`. Stale keys never cause an error.
#[derive(Debug)]
pub struct SelectionManager<'a, K> {
    collection: &'a Collection<K>,
    state: &'a mut SelectionState<K>,
    /// Memoized select-all answer, valid only for the recorded epoch.
    select_all_memo: Option<(u64, bool)>,
}

impl<'a, K: Clone + Eq + Hash> SelectionManager<'a, K> {
    /// Creates a manager over the given collection and state.
    pub fn new(collection: &'a Collection<K>, state: &'a mut SelectionState<K>) -> Self {
        Self {
            collection,
            state,
            select_all_memo: None,
        }
    }

    /// The collection this manager reads from.
    #[must_use]
    pub fn collection(&self) -> &Collection<K> {
        self.collection
    }

    /// The selection mode.
    #[must_use]
    pub fn selection_mode(&self) -> SelectionMode {
        self.state.selection_mode()
    }

    /// The current selection behavior.
    #[must_use]
    pub fn selection_behavior(&self) -> SelectionBehavior {
        self.state.selection_behavior()
    }

    /// Sets the selection behavior (for example, a touch long-press switching
    /// replace to toggle).
    pub fn set_selection_behavior(&mut self, behavior: SelectionBehavior) {
        self.state.set_selection_behavior(behavior);
    }

    /// Whether the collection as a whole has focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.state.is_focused()
    }

    /// Sets whether the collection as a whole has focus.
    pub fn set_focused(&mut self, is_focused: bool) {
        self.state.set_focused(is_focused);
    }

    /// The key of the currently focused item, if any.
    #[must_use]
    pub fn focused_key(&self) -> Option<&K> {
        self.state.focused_key()
    }

    /// The edge-child strategy recorded with the last focus move.
    #[must_use]
    pub fn child_focus_strategy(&self) -> FocusStrategy {
        self.state.child_focus_strategy()
    }

    /// Sets the focused key, validating it against the collection first:
    /// unknown keys are silently ignored, since focus targets naturally go
    /// stale when the collection is rebuilt. `None` always clears focus.
    pub fn set_focused_key(&mut self, key: Option<K>, strategy: FocusStrategy) {
        if let Some(k) = &key
            && !self.collection.contains(k)
        {
            return;
        }
        self.state.set_focused_key(key, strategy);
    }

    /// Resolves a key to the nearest selectable item key.
    ///
    /// Keys absent from the collection pass through unchanged (a selection may
    /// legitimately hold keys from a previous rendering). Section keys walk up
    /// `parent_key` to the nearest enclosing item, or resolve to nothing.
    fn resolve_key(&self, key: &K) -> Option<K> {
        let Some(mut node) = self.collection.node(key) else {
            return Some(key.clone());
        };
        loop {
            if node.is_item() {
                return Some(node.key.clone());
            }
            node = self.collection.node(node.parent_key.as_ref()?)?;
        }
    }

    /// Returns `true` if `key` names a selectable item: the mode allows
    /// selection, the key is not disabled, and the collection has an item
    /// (not a section) under it.
    #[must_use]
    pub fn can_select_item(&self, key: &K) -> bool {
        if self.state.selection_mode() == SelectionMode::None
            || self.state.disabled_keys().contains(key)
        {
            return false;
        }
        self.collection.item(key).is_some()
    }

    /// Returns `true` if `key` is excluded from all interaction — that is, it
    /// is in the disabled set *and* the disabled behavior is
    /// [`DisabledBehavior::All`]. A key disabled for selection only still
    /// allows actions and focus.
    #[must_use]
    pub fn is_disabled(&self, key: &K) -> bool {
        self.state.disabled_keys().contains(key)
            && self.state.disabled_behavior() == DisabledBehavior::All
    }

    /// Returns `true` if `key` (or its nearest item ancestor) is selected.
    #[must_use]
    pub fn is_selected(&self, key: &K) -> bool {
        if self.state.selection_mode() == SelectionMode::None {
            return false;
        }
        let Some(key) = self.resolve_key(key) else {
            return false;
        };
        match self.state.selected() {
            SelectedKeys::All => self.can_select_item(&key),
            SelectedKeys::Set(selection) => selection.contains(&key),
        }
    }

    /// Returns `true` if nothing is selected. The `All` sentinel is never
    /// empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.selected().is_empty()
    }

    /// Returns `true` if every selectable key is selected.
    ///
    /// For a materialized selection this expands the selectable key set and
    /// checks membership, which is O(collection size); the answer is memoized
    /// against the state's epoch so repeated queries between mutations are
    /// cheap.
    pub fn is_select_all(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.state.selected().is_all() {
            return true;
        }
        let epoch = self.state.epoch();
        if let Some((memo_epoch, value)) = self.select_all_memo
            && memo_epoch == epoch
        {
            return value;
        }
        let value = match self.state.selected() {
            SelectedKeys::All => true,
            SelectedKeys::Set(selection) => self
                .select_all_keys()
                .iter()
                .all(|key| selection.contains(key)),
        };
        self.select_all_memo = Some((epoch, value));
        value
    }

    /// Collects every selectable item key, walking the collection from its
    /// first key forward. This is the lazy expansion of the `All` sentinel.
    #[must_use]
    pub fn select_all_keys(&self) -> Vec<K> {
        let mut keys = Vec::new();
        let mut cursor = self.collection.first_key();
        while let Some(key) = cursor {
            if self.can_select_item(key) {
                keys.push(key.clone());
            }
            cursor = self.collection.key_after(key);
        }
        keys
    }

    /// The materialized set of selected keys, expanding the `All` sentinel.
    #[must_use]
    pub fn selected_keys(&self) -> Selection<K> {
        match self.state.selected() {
            SelectedKeys::All => Selection::from_keys(self.select_all_keys()),
            SelectedKeys::Set(selection) => selection.clone(),
        }
    }

    /// Key of the selected item with the lowest index, if any.
    #[must_use]
    pub fn first_selected_key(&self) -> Option<K> {
        self.selected_key_by(|candidate, best| candidate < best)
    }

    /// Key of the selected item with the highest index, if any.
    #[must_use]
    pub fn last_selected_key(&self) -> Option<K> {
        self.selected_key_by(|candidate, best| candidate > best)
    }

    fn selected_key_by(&self, better: impl Fn(usize, usize) -> bool) -> Option<K> {
        let mut best: Option<(usize, K)> = None;
        for key in self.selected_keys().iter() {
            let Some(index) = self.collection.item(key).and_then(|n| n.index) else {
                continue;
            };
            match &best {
                Some((best_index, _)) if !better(index, *best_index) => {}
                _ => best = Some((index, key.clone())),
            }
        }
        best.map(|(_, key)| key)
    }

    /// Compares the current selection against a plain key set: size check,
    /// then membership cross-check in both directions.
    #[must_use]
    pub fn is_selection_equal(&self, other: &HashSet<K>) -> bool {
        self.selected_keys().same_keys(other)
    }

    /// Toggles `key`'s membership in the selection.
    ///
    /// In single mode, toggling an unselected key behaves as
    /// [`replace_selection`](Self::replace_selection). The `All` sentinel is
    /// expanded before toggling. Aborts without committing if the result
    /// would be empty while `disallow_empty_selection` is set.
    pub fn toggle_selection(&mut self, key: &K) {
        if self.state.selection_mode() == SelectionMode::None {
            return;
        }
        if self.state.selection_mode() == SelectionMode::Single && !self.is_selected(key) {
            self.replace_selection(key);
            return;
        }
        let Some(key) = self.resolve_key(key) else {
            return;
        };
        let mut keys = match self.state.selected() {
            SelectedKeys::All => Selection::from_keys(self.select_all_keys()),
            SelectedKeys::Set(selection) => selection.clone(),
        };
        if keys.contains(&key) {
            keys.remove(&key);
        } else if self.can_select_item(&key) {
            keys.insert(key.clone());
            keys.set_endpoints(Some(key.clone()), Some(key));
        }
        if self.state.disallow_empty_selection() && keys.is_empty() {
            return;
        }
        self.commit(SelectedKeys::Set(keys));
    }

    /// Replaces the whole selection with the singleton `{key}` if the key is
    /// selectable, or with the empty selection otherwise. Prior selection
    /// size is irrelevant.
    pub fn replace_selection(&mut self, key: &K) {
        if self.state.selection_mode() == SelectionMode::None {
            return;
        }
        let Some(key) = self.resolve_key(key) else {
            return;
        };
        let selection = if self.can_select_item(&key) {
            Selection::single(key)
        } else {
            Selection::new()
        };
        self.commit(SelectedKeys::Set(selection));
    }

    /// Extends the selection from the current anchor to `to_key`.
    ///
    /// Single mode delegates to [`replace_selection`](Self::replace_selection).
    /// Extending from the `All` sentinel collapses to the singleton
    /// `{to_key}`. Otherwise the previous range `[anchor, current]` is
    /// removed and every selectable key in the new range `[to_key, anchor]`
    /// added, so shrinking a range deselects the keys that fell out of it.
    pub fn extend_selection(&mut self, to_key: &K) {
        match self.state.selection_mode() {
            SelectionMode::None => return,
            SelectionMode::Single => {
                self.replace_selection(to_key);
                return;
            }
            SelectionMode::Multiple => {}
        }
        let Some(to_key) = self.resolve_key(to_key) else {
            return;
        };
        let new_selection = match self.state.selected() {
            SelectedKeys::All => Selection::single(to_key),
            SelectedKeys::Set(selection) => {
                let anchor = selection
                    .anchor_key()
                    .cloned()
                    .unwrap_or_else(|| to_key.clone());
                let old_current = selection
                    .current_key()
                    .cloned()
                    .unwrap_or_else(|| to_key.clone());
                let mut next = selection.clone();
                for key in self.keys_in_range(&anchor, &old_current) {
                    next.remove(&key);
                }
                for key in self.keys_in_range(&to_key, &anchor) {
                    if self.can_select_item(&key) {
                        next.insert(key);
                    }
                }
                next.set_endpoints(Some(anchor), Some(to_key));
                next
            }
        };
        self.commit(SelectedKeys::Set(new_selection));
    }

    /// Item keys in the inclusive range between `from` and `to`, walked from
    /// the lower index to the higher regardless of argument order. Empty if
    /// either endpoint is not an item in the collection.
    fn keys_in_range(&self, from: &K, to: &K) -> SmallVec<[K; 8]> {
        let mut keys = SmallVec::new();
        let (Some(a), Some(b)) = (
            self.collection.item(from).and_then(|n| n.index),
            self.collection.item(to).and_then(|n| n.index),
        ) else {
            return keys;
        };
        let (low, high) = if a <= b { (from, to) } else { (to, from) };
        let mut cursor = Some(low);
        while let Some(key) = cursor {
            if self.collection.item(key).is_some() {
                keys.push(key.clone());
            }
            if key == high {
                break;
            }
            cursor = self.collection.key_after(key);
        }
        keys
    }

    /// Replaces the selection wholesale with the given keys, resolving each
    /// through the collection and skipping keys that resolve to nothing. In
    /// single mode only the first resolvable key is kept.
    pub fn set_selected_keys<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        if self.state.selection_mode() == SelectionMode::None {
            return;
        }
        let mut selection = Selection::new();
        for key in keys {
            let Some(key) = self.resolve_key(&key) else {
                continue;
            };
            selection.insert(key.clone());
            selection.set_endpoints(Some(key.clone()), Some(key));
            if self.state.selection_mode() == SelectionMode::Single {
                break;
            }
        }
        self.commit(SelectedKeys::Set(selection));
    }

    /// Selects every selectable key via the `All` sentinel. Only meaningful
    /// in multiple mode; otherwise a no-op.
    pub fn select_all(&mut self) {
        if self.state.selection_mode() == SelectionMode::Multiple {
            self.commit(SelectedKeys::All);
        }
    }

    /// Clears the selection, unless it is already empty or
    /// `disallow_empty_selection` is set (in which case this is a true no-op
    /// rather than an invariant violation).
    pub fn clear_selection(&mut self) {
        if !self.state.disallow_empty_selection() && !self.state.selected().is_empty() {
            self.commit(SelectedKeys::empty());
        }
    }

    /// Clears the selection if everything is selected, selects all otherwise.
    pub fn toggle_select_all(&mut self) {
        if self.is_select_all() {
            self.clear_selection();
        } else {
            self.select_all();
        }
    }

    /// The gesture-level entry point used by item-level press handlers.
    ///
    /// Single mode: toggles if the key is already selected and empty
    /// selection is allowed, replaces otherwise. Multiple mode: toggles when
    /// the behavior is [`SelectionBehavior::Toggle`] or the gesture came from
    /// a touch or virtual pointer, replaces otherwise.
    pub fn select(&mut self, key: &K, pointer: Option<Pointer>) {
        match self.state.selection_mode() {
            SelectionMode::None => {}
            SelectionMode::Single => {
                if self.is_selected(key) && !self.state.disallow_empty_selection() {
                    self.toggle_selection(key);
                } else {
                    self.replace_selection(key);
                }
            }
            SelectionMode::Multiple => {
                let toggles = self.state.selection_behavior() == SelectionBehavior::Toggle
                    || matches!(pointer, Some(Pointer::Touch | Pointer::Virtual));
                if toggles {
                    self.toggle_selection(key);
                } else {
                    self.replace_selection(key);
                }
            }
        }
    }

    fn commit(&mut self, selected: SelectedKeys<K>) {
        if self.state.set_selected(selected) {
            self.select_all_memo = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SelectionOptions;
    use alloc::vec;
    use alloc::vec::Vec;
    use understory_collection::SourceNode;

    fn letters(n: usize) -> Collection<&'static str> {
        const KEYS: [&str; 5] = ["a", "b", "c", "d", "e"];
        const LABELS: [&str; 5] = ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"];
        let source: Vec<SourceNode<&'static str>> = KEYS[..n]
            .iter()
            .zip(&LABELS[..n])
            .map(|(k, l)| SourceNode::item(*k, *l))
            .collect();
        Collection::from_source(&source).unwrap()
    }

    fn multiple() -> SelectionState<&'static str> {
        SelectionState::new(SelectionOptions {
            selection_mode: SelectionMode::Multiple,
            ..Default::default()
        })
    }

    fn single(disallow_empty: bool) -> SelectionState<&'static str> {
        SelectionState::new(SelectionOptions {
            selection_mode: SelectionMode::Single,
            disallow_empty_selection: disallow_empty,
            ..Default::default()
        })
    }

    fn selected(manager: &SelectionManager<'_, &'static str>) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = manager.selected_keys().iter().copied().collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn none_mode_rejects_everything() {
        let collection = letters(3);
        let mut state = SelectionState::new(SelectionOptions::<&str>::default());
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.toggle_selection(&"a");
        manager.replace_selection(&"a");
        manager.extend_selection(&"b");
        manager.select_all();
        manager.select(&"a", None);
        assert!(manager.is_empty());
        assert!(!manager.is_selected(&"a"));
        assert!(!manager.can_select_item(&"a"));
    }

    #[test]
    fn single_mode_toggle_is_idempotent_when_empty_allowed() {
        let collection = letters(3);
        let mut state = single(false);
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.toggle_selection(&"a");
        assert_eq!(selected(&manager), vec!["a"]);
        manager.toggle_selection(&"a");
        assert!(manager.is_empty());
    }

    #[test]
    fn single_mode_toggle_respects_disallow_empty() {
        let collection = letters(3);
        let mut state = single(true);
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.toggle_selection(&"a");
        manager.toggle_selection(&"a");
        assert_eq!(selected(&manager), vec!["a"], "second toggle is a no-op");
    }

    #[test]
    fn replace_always_yields_singleton() {
        let collection = letters(5);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.set_selected_keys(vec!["a", "b", "c"]);
        manager.replace_selection(&"e");
        assert_eq!(selected(&manager), vec!["e"]);
        let keys = manager.selected_keys();
        assert_eq!(keys.anchor_key(), Some(&"e"));
        assert_eq!(keys.current_key(), Some(&"e"));
    }

    #[test]
    fn replace_with_unselectable_key_empties_selection() {
        let collection = letters(3);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.toggle_selection(&"a");
        manager.replace_selection(&"zzz");
        assert!(manager.is_empty());
    }

    #[test]
    fn extend_then_shrink_deselects_dropped_range() {
        let collection = letters(5);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        // Anchor at b (index 1), extend to d (index 3), then shrink to c.
        manager.replace_selection(&"b");
        manager.extend_selection(&"d");
        assert_eq!(selected(&manager), vec!["b", "c", "d"]);

        manager.extend_selection(&"c");
        assert_eq!(selected(&manager), vec!["b", "c"], "d must be deselected");
        let keys = manager.selected_keys();
        assert_eq!(keys.anchor_key(), Some(&"b"));
        assert_eq!(keys.current_key(), Some(&"c"));
    }

    #[test]
    fn extend_walks_low_to_high_regardless_of_direction() {
        let collection = letters(5);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        // Extend backwards: anchor d, extend to a.
        manager.replace_selection(&"d");
        manager.extend_selection(&"a");
        assert_eq!(selected(&manager), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn extend_defaults_anchor_to_last_acted_key() {
        let collection = letters(3);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.toggle_selection(&"a");
        assert_eq!(selected(&manager), vec!["a"]);
        manager.toggle_selection(&"c");
        assert_eq!(selected(&manager), vec!["a", "c"]);

        // Anchor defaulted to c (the last toggled key): the previous range
        // [c, c] is removed, then [b, c] is added back.
        manager.extend_selection(&"b");
        assert_eq!(selected(&manager), vec!["a", "b", "c"]);
        let keys = manager.selected_keys();
        assert_eq!(keys.anchor_key(), Some(&"c"));
        assert_eq!(keys.current_key(), Some(&"b"));
    }

    #[test]
    fn extend_from_all_collapses_to_singleton() {
        let collection = letters(4);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.select_all();
        manager.extend_selection(&"b");
        assert_eq!(selected(&manager), vec!["b"]);
    }

    #[test]
    fn extend_in_single_mode_replaces() {
        let collection = letters(3);
        let mut state = single(false);
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.replace_selection(&"a");
        manager.extend_selection(&"c");
        assert_eq!(selected(&manager), vec!["c"]);
    }

    #[test]
    fn select_all_and_disabled_interaction() {
        let collection = letters(4);
        let mut disabled = HashSet::new();
        disabled.insert("c");
        let mut state = SelectionState::new(SelectionOptions {
            selection_mode: SelectionMode::Multiple,
            disabled_behavior: DisabledBehavior::All,
            disabled_keys: disabled,
            ..Default::default()
        });
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.select_all();
        assert!(!manager.is_selected(&"c"), "disabled key stays unselected");
        assert!(manager.is_selected(&"a"));
        assert!(manager.is_selected(&"d"));
        assert!(manager.is_disabled(&"c"));
        assert!(!manager.is_disabled(&"a"));
        assert_eq!(manager.select_all_keys(), vec!["a", "b", "d"]);
    }

    #[test]
    fn selection_only_disabled_keys_still_allow_actions() {
        let collection = letters(2);
        let mut disabled = HashSet::new();
        disabled.insert("a");
        let mut state = SelectionState::new(SelectionOptions {
            selection_mode: SelectionMode::Multiple,
            disabled_behavior: DisabledBehavior::Selection,
            disabled_keys: disabled,
            ..Default::default()
        });
        let mut manager = SelectionManager::new(&collection, &mut state);

        assert!(!manager.is_disabled(&"a"), "disabled for selection only");
        assert!(!manager.can_select_item(&"a"));
        manager.toggle_selection(&"a");
        assert!(manager.is_empty());
    }

    #[test]
    fn is_select_all_expands_materialized_selection() {
        let collection = letters(3);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.set_selected_keys(vec!["a", "b"]);
        assert!(!manager.is_select_all());
        manager.toggle_selection(&"c");
        assert!(manager.is_select_all(), "memo must not outlive the epoch");
        manager.toggle_selection(&"c");
        assert!(!manager.is_select_all());
    }

    #[test]
    fn toggle_select_all_round_trips() {
        let collection = letters(3);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.toggle_select_all();
        assert!(manager.is_select_all());
        assert!(manager.state.selected().is_all());
        manager.toggle_select_all();
        assert!(manager.is_empty());
    }

    #[test]
    fn toggle_on_all_expands_before_removing() {
        let collection = letters(3);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.select_all();
        manager.toggle_selection(&"b");
        assert_eq!(selected(&manager), vec!["a", "c"]);
        assert!(!manager.state.selected().is_all());
    }

    #[test]
    fn set_selected_keys_round_trips() {
        let collection = letters(4);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.set_selected_keys(vec!["b", "d"]);
        let before = selected(&manager);
        let fed_back: Vec<&'static str> = manager.selected_keys().iter().copied().collect();
        manager.set_selected_keys(fed_back);
        assert_eq!(selected(&manager), before);
    }

    #[test]
    fn set_selected_keys_skips_unresolvable_and_respects_single_mode() {
        let collection = letters(3);
        let mut state = single(false);
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.set_selected_keys(vec!["zzz-not-present", "b", "c"]);
        // The stale key passes through resolution unchanged, so it lands in
        // the set and single mode stops there.
        assert_eq!(selected(&manager), vec!["zzz-not-present"]);
    }

    #[test]
    fn select_gesture_single_mode_keeps_selection_under_disallow_empty() {
        let collection = letters(3);
        let mut state = single(true);
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.replace_selection(&"b");
        // A repeated click must not clear the selection.
        manager.select(&"b", Some(Pointer::Mouse));
        assert_eq!(selected(&manager), vec!["b"]);
    }

    #[test]
    fn select_gesture_multiple_mode_honors_behavior_and_pointer() {
        let collection = letters(3);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);
        manager.set_selection_behavior(SelectionBehavior::Replace);

        manager.select(&"a", Some(Pointer::Mouse));
        manager.select(&"b", Some(Pointer::Mouse));
        assert_eq!(selected(&manager), vec!["b"], "replace behavior");

        // Touch and virtual pointers force toggle semantics.
        manager.select(&"c", Some(Pointer::Touch));
        assert_eq!(selected(&manager), vec!["b", "c"]);
        manager.select(&"a", Some(Pointer::Virtual));
        assert_eq!(selected(&manager), vec!["a", "b", "c"]);
    }

    #[test]
    fn first_and_last_selected_keys_follow_item_indices() {
        let collection = letters(5);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        assert_eq!(manager.first_selected_key(), None);
        manager.set_selected_keys(vec!["d", "b", "e"]);
        assert_eq!(manager.first_selected_key(), Some("b"));
        assert_eq!(manager.last_selected_key(), Some("e"));
    }

    #[test]
    fn section_keys_resolve_to_nearest_item_ancestor() {
        let collection = Collection::from_source(&[SourceNode::section(
            "s",
            "Group",
            vec![SourceNode::item("a", "A")],
        )])
        .unwrap();
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        // A top-level section has no item ancestor: nothing to select.
        manager.toggle_selection(&"s");
        assert!(manager.is_empty());
        assert!(!manager.is_selected(&"s"));
    }

    #[test]
    fn is_selected_under_all_respects_selectability() {
        let collection = Collection::from_source(&[
            SourceNode::item("a", "A"),
            SourceNode::section("s", "Group", vec![SourceNode::item("b", "B")]),
        ])
        .unwrap();
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.select_all();
        assert!(manager.is_selected(&"a"));
        assert!(manager.is_selected(&"b"));
        assert!(!manager.is_selected(&"zzz"));
    }

    #[test]
    fn clear_selection_is_noop_under_disallow_empty() {
        let collection = letters(3);
        let mut state = SelectionState::new(SelectionOptions {
            selection_mode: SelectionMode::Multiple,
            disallow_empty_selection: true,
            ..Default::default()
        });
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.toggle_selection(&"a");
        manager.clear_selection();
        assert_eq!(selected(&manager), vec!["a"]);
    }

    #[test]
    fn is_selection_equal_cross_checks_membership() {
        let collection = letters(3);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.set_selected_keys(vec!["a", "c"]);
        let same: HashSet<&str> = ["c", "a"].into_iter().collect();
        let different: HashSet<&str> = ["a", "b"].into_iter().collect();
        assert!(manager.is_selection_equal(&same));
        assert!(!manager.is_selection_equal(&different));
    }

    #[test]
    fn set_focused_key_validates_against_collection() {
        let collection = letters(2);
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.set_focused_key(Some("zzz"), FocusStrategy::First);
        assert_eq!(manager.focused_key(), None, "unknown key is ignored");
        manager.set_focused_key(Some("a"), FocusStrategy::First);
        assert_eq!(manager.focused_key(), Some(&"a"));
        manager.set_focused_key(None, FocusStrategy::First);
        assert_eq!(manager.focused_key(), None);
    }

    #[test]
    fn range_across_sections_selects_items_only() {
        let collection = Collection::from_source(&[
            SourceNode::item("a", "A"),
            SourceNode::section(
                "s",
                "Group",
                vec![SourceNode::item("b", "B"), SourceNode::item("c", "C")],
            ),
            SourceNode::item("d", "D"),
        ])
        .unwrap();
        let mut state = multiple();
        let mut manager = SelectionManager::new(&collection, &mut state);

        manager.replace_selection(&"a");
        manager.extend_selection(&"d");
        assert_eq!(selected(&manager), vec!["a", "b", "c", "d"]);
        assert!(!manager.is_selected(&"s"), "sections are never selected");
    }
}
