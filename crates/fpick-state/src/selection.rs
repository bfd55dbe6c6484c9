#![forbid(unsafe_code)]

//! Single-select list state: the candidate collection, the selected key, the
//! focused key, and disabled keys.
//!
//! The selected key is a [`Controllable`]; its change hook is the list's
//! selection-change notification. The focused key is always local.
//!
//! # Invariants
//!
//! 1. A disabled key is never focused or selected through this API.
//! 2. Only leaf items are focusable; sections are skipped by traversal.
//! 3. A focused key, when set, is present in the collection it was validated
//!    against.

use std::collections::HashSet;

use fpick_core::{Collection, Item, Key};

use crate::controllable::{Controllable, Request};

/// Direction of a focus move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Forward,
    Backward,
}

/// Focus and selection pointers plus disabled-key tracking.
#[derive(Debug)]
pub struct SelectionManager {
    selected: Controllable<Option<Key>>,
    focused: Option<Key>,
    disabled: HashSet<Key>,
}

impl SelectionManager {
    pub(crate) fn new(selected: Controllable<Option<Key>>, disabled: HashSet<Key>) -> Self {
        Self {
            selected,
            focused: None,
            disabled,
        }
    }

    /// The authoritative selected key.
    pub fn selected_key(&self) -> Option<&Key> {
        self.selected.get().as_ref()
    }

    /// Whether an external owner controls the selected key.
    pub fn is_selection_controlled(&self) -> bool {
        self.selected.is_controlled()
    }

    /// Keyboard/pointer focus within the list.
    pub fn focused_key(&self) -> Option<&Key> {
        self.focused.as_ref()
    }

    /// Whether `key` is disabled.
    pub fn is_disabled(&self, key: &str) -> bool {
        self.disabled.contains(key)
    }

    /// Disabled keys.
    pub fn disabled_keys(&self) -> &HashSet<Key> {
        &self.disabled
    }

    /// Whether `key` is selected.
    pub fn is_selected(&self, key: &str) -> bool {
        self.selected_key().is_some_and(|k| k.as_str() == key)
    }

    /// Whether `key` is focused.
    pub fn is_focused(&self, key: &str) -> bool {
        self.focused.as_ref().is_some_and(|k| k.as_str() == key)
    }

    pub(crate) fn select(&mut self, key: Option<Key>) -> Request {
        if key.as_ref().is_some_and(|k| self.disabled.contains(k)) {
            return Request::Unchanged;
        }
        self.selected.request(key)
    }

    pub(crate) fn notify_selection(&mut self) {
        self.selected.notify();
    }

    pub(crate) fn sync_selected(&mut self, key: Option<Key>) -> bool {
        self.selected.sync(key)
    }

    pub(crate) fn set_disabled(&mut self, keys: HashSet<Key>) {
        self.disabled = keys;
        if self
            .focused
            .as_ref()
            .is_some_and(|k| self.disabled.contains(k))
        {
            self.focused = None;
        }
    }

    /// Focus `key` if it is an enabled leaf of `visible`. `None` clears focus.
    pub(crate) fn focus<T>(&mut self, key: Option<Key>, visible: &Collection<T>) -> bool {
        match key {
            None => {
                self.focused = None;
                true
            }
            Some(key) if self.is_focusable(key.as_str(), visible) => {
                self.focused = Some(key);
                true
            }
            Some(_) => false,
        }
    }

    pub(crate) fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// Drop focus when it no longer points into `visible`.
    pub(crate) fn retain_focus_in<T>(&mut self, visible: &Collection<T>) {
        if self
            .focused
            .as_ref()
            .is_some_and(|k| !self.is_focusable(k.as_str(), visible))
        {
            self.focused = None;
        }
    }

    fn is_focusable<T>(&self, key: &str, visible: &Collection<T>) -> bool {
        visible.item(key).is_some() && !self.disabled.contains(key)
    }

    fn focusable_keys<'a, T>(&self, visible: &'a Collection<T>) -> Vec<&'a Key> {
        visible
            .keys()
            .filter(|k| !self.disabled.contains(*k))
            .collect()
    }

    pub(crate) fn focus_first<T>(&mut self, visible: &Collection<T>) -> bool {
        let first = self.focusable_keys(visible).first().map(|k| (*k).clone());
        self.move_to(first)
    }

    pub(crate) fn focus_last<T>(&mut self, visible: &Collection<T>) -> bool {
        let last = self.focusable_keys(visible).last().map(|k| (*k).clone());
        self.move_to(last)
    }

    pub(crate) fn focus_next<T>(&mut self, visible: &Collection<T>, wrap: bool) -> bool {
        self.step(visible, Step::Forward, wrap)
    }

    pub(crate) fn focus_previous<T>(&mut self, visible: &Collection<T>, wrap: bool) -> bool {
        self.step(visible, Step::Backward, wrap)
    }

    fn step<T>(&mut self, visible: &Collection<T>, step: Step, wrap: bool) -> bool {
        let keys = self.focusable_keys(visible);
        if keys.is_empty() {
            return false;
        }
        let last = keys.len() - 1;
        let current = self
            .focused
            .as_ref()
            .and_then(|f| keys.iter().position(|k| *k == f));
        let target = match (current, step) {
            (None, Step::Forward) => Some(0),
            (None, Step::Backward) => Some(last),
            (Some(i), Step::Forward) if i < last => Some(i + 1),
            (Some(_), Step::Forward) => wrap.then_some(0),
            (Some(i), Step::Backward) if i > 0 => Some(i - 1),
            (Some(_), Step::Backward) => wrap.then_some(last),
        };
        match target {
            Some(idx) => {
                let key = keys[idx].clone();
                self.move_to(Some(key))
            }
            None => false,
        }
    }

    fn move_to(&mut self, key: Option<Key>) -> bool {
        match key {
            Some(key) => {
                let changed = self.focused.as_ref() != Some(&key);
                self.focused = Some(key);
                changed
            }
            None => false,
        }
    }
}

/// The selection substrate: a candidate collection plus a [`SelectionManager`].
#[derive(Debug)]
pub struct SingleSelectList<T> {
    collection: Collection<T>,
    manager: SelectionManager,
}

impl<T> SingleSelectList<T> {
    /// Create a list over `collection`.
    pub fn new(collection: Collection<T>, manager: SelectionManager) -> Self {
        Self {
            collection,
            manager,
        }
    }

    /// The full, unfiltered collection.
    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Focus and selection pointers.
    pub fn selection_manager(&self) -> &SelectionManager {
        &self.manager
    }

    pub(crate) fn selection_manager_mut(&mut self) -> &mut SelectionManager {
        &mut self.manager
    }

    /// The authoritative selected key.
    pub fn selected_key(&self) -> Option<&Key> {
        self.manager.selected_key()
    }

    /// The item behind the selected key, if it still exists.
    pub fn selected_item(&self) -> Option<&Item<T>> {
        self.selected_key()
            .and_then(|key| self.collection.item(key.as_str()))
    }

    /// Disabled keys.
    pub fn disabled_keys(&self) -> &HashSet<Key> {
        self.manager.disabled_keys()
    }

    /// Request a new selected key, firing the selection-change hook if it
    /// differs from the current one.
    pub(crate) fn set_selected_key(&mut self, key: Option<Key>) -> Request {
        self.manager.select(key)
    }

    pub(crate) fn set_collection(&mut self, collection: Collection<T>) {
        self.collection = collection;
    }
}
