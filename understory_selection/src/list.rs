// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List-state facades binding a data source to a collection and a selection
//! state.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use hashbrown::HashSet;

use understory_collection::{BuildError, Collection, CollectionNode, SourceNode, disabled_keys};

use crate::manager::SelectionManager;
use crate::selection::{SelectedKeys, Selection};
use crate::state::{SelectionMode, SelectionOptions, SelectionState};

/// Predicate deciding which source nodes a [`ListState`] keeps. Rejecting a
/// section drops its entire subtree.
pub type NodeFilter<K> = Box<dyn Fn(&SourceNode<K>) -> bool>;

/// Owns a data source, the collection built from it, and the selection state
/// over that collection.
///
/// The facade keeps the three in sync: [`reload`](Self::reload) rebuilds the
/// collection from new source data, rederives the disabled-key set from the
/// source's per-item flags, and clears a focused key that no longer exists.
/// [`selection_manager`](Self::selection_manager) hands out a fresh borrowing
/// [`SelectionManager`] for queries and mutations.
pub struct ListState<K> {
    source: Vec<SourceNode<K>>,
    collection: Collection<K>,
    state: SelectionState<K>,
    filter: Option<NodeFilter<K>>,
    /// Disabled keys supplied via options, merged with the source-derived
    /// ones on every rebuild.
    base_disabled: HashSet<K>,
}

impl<K: fmt::Debug> fmt::Debug for ListState<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListState")
            .field("source", &self.source)
            .field("collection", &self.collection)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<K: Clone + Eq + Hash> ListState<K> {
    /// Creates a list state from the given source and options.
    ///
    /// Items marked disabled in the source are added to the options'
    /// disabled-key set.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateKey`] if two source records share a key.
    pub fn new(
        source: Vec<SourceNode<K>>,
        options: SelectionOptions<K>,
    ) -> Result<Self, BuildError<K>> {
        Self::with_filter(source, options, None)
    }

    /// Creates a list state like [`ListState::new`], retaining only source
    /// nodes accepted by `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateKey`] if two retained records share a key.
    pub fn with_filter(
        source: Vec<SourceNode<K>>,
        options: SelectionOptions<K>,
        filter: Option<NodeFilter<K>>,
    ) -> Result<Self, BuildError<K>> {
        let base_disabled = options.disabled_keys.clone();
        let mut this = Self {
            source: Vec::new(),
            collection: Collection::new(),
            state: SelectionState::new(options),
            filter,
            base_disabled,
        };
        this.reload(source)?;
        Ok(this)
    }

    /// The collection built from the current source.
    #[must_use]
    pub fn collection(&self) -> &Collection<K> {
        &self.collection
    }

    /// The underlying selection state.
    #[must_use]
    pub fn state(&self) -> &SelectionState<K> {
        &self.state
    }

    /// Mutable access to the underlying selection state, e.g. for registering
    /// change callbacks.
    pub fn state_mut(&mut self) -> &mut SelectionState<K> {
        &mut self.state
    }

    /// Hands out a manager borrowing this facade's collection and state.
    pub fn selection_manager(&mut self) -> SelectionManager<'_, K> {
        SelectionManager::new(&self.collection, &mut self.state)
    }

    /// Replaces the source data and rebuilds the collection.
    ///
    /// The disabled-key set is rederived (options-supplied keys merged with
    /// the source's per-item flags), and the focused key is cleared if it no
    /// longer exists in the rebuilt collection. The selection itself is left
    /// untouched; stale selected keys are tolerated by every query.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateKey`] if two retained records share a
    /// key. The previous source and collection stay in place on error.
    pub fn reload(&mut self, source: Vec<SourceNode<K>>) -> Result<(), BuildError<K>> {
        let collection = match &self.filter {
            Some(filter) => Collection::from_source_filtered(&source, filter.as_ref()),
            None => Collection::from_source(&source),
        }?;

        let mut disabled = self.base_disabled.clone();
        disabled.extend(disabled_keys(&source));
        self.state.set_disabled_keys(disabled);

        self.source = source;
        self.collection = collection;

        if let Some(key) = self.state.focused_key()
            && !self.collection.contains(key)
        {
            let strategy = self.state.child_focus_strategy();
            self.state.set_focused_key(None, strategy);
        }
        Ok(())
    }

    /// Replaces the node filter and rebuilds the collection from the stored
    /// source.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateKey`] if two retained records share a key.
    pub fn set_filter(&mut self, filter: Option<NodeFilter<K>>) -> Result<(), BuildError<K>> {
        self.filter = filter;
        let source = self.source.clone();
        self.reload(source)
    }
}

/// A [`ListState`] restricted to single selection, projecting the selection
/// down to one optional key.
///
/// The mode is forced to [`SelectionMode::Single`] and
/// `disallow_empty_selection` to `true`; clearing happens only through
/// [`set_selected_key`](Self::set_selected_key) with `None`.
#[derive(Debug)]
pub struct SingleSelectListState<K> {
    inner: ListState<K>,
}

impl<K: Clone + Eq + Hash> SingleSelectListState<K> {
    /// Creates a single-select list state. The `selection_mode` and
    /// `disallow_empty_selection` fields of `options` are overridden.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateKey`] if two source records share a key.
    pub fn new(
        source: Vec<SourceNode<K>>,
        options: SelectionOptions<K>,
    ) -> Result<Self, BuildError<K>> {
        let inner = ListState::new(
            source,
            SelectionOptions {
                selection_mode: SelectionMode::Single,
                disallow_empty_selection: true,
                ..options
            },
        )?;
        Ok(Self { inner })
    }

    /// The underlying list state.
    #[must_use]
    pub fn list(&self) -> &ListState<K> {
        &self.inner
    }

    /// Mutable access to the underlying list state.
    pub fn list_mut(&mut self) -> &mut ListState<K> {
        &mut self.inner
    }

    /// The selected key, if any.
    #[must_use]
    pub fn selected_key(&self) -> Option<&K> {
        match self.inner.state.selected() {
            SelectedKeys::All => None,
            SelectedKeys::Set(selection) => selection.iter().next(),
        }
    }

    /// The collection node of the selected key, if it exists in the current
    /// collection.
    #[must_use]
    pub fn selected_item(&self) -> Option<&CollectionNode<K>> {
        let key = self.selected_key()?;
        self.inner.collection.item(key)
    }

    /// Sets (or clears, with `None`) the selected key.
    ///
    /// Unlike the state-level setter, this re-invokes the selection callback
    /// even when the value is unchanged: a user picking the already-selected
    /// option is still an action the host must hear about (e.g. to close a
    /// popup).
    pub fn set_selected_key(&mut self, key: Option<K>) {
        let selection = match key {
            Some(key) => Selection::single(key),
            None => Selection::new(),
        };
        if !self.inner.state.set_selected(SelectedKeys::Set(selection)) {
            self.inner.state.notify_selection();
        }
    }
}
