#![forbid(unsafe_code)]

//! The picker controller.
//!
//! [`PickerController`] composes a [`SingleSelectList`] (selection substrate),
//! a [`MenuTrigger`] (open/trigger substrate), and a [`QueryFilter`]
//! (query/filter layer), and coordinates the query, open state, focused
//! candidate, and selected candidate.
//!
//! # Invariants
//!
//! 1. A closed menu has no focused key and is not in the show-all view.
//! 2. A focused key, when set, names an enabled leaf of the visible collection.
//! 3. With externally supplied items the visible collection is the original.
//!
//! All writes of the open flag go through one private setter, which performs
//! the close-time clears and fires the open-change hook. Hooks receive values,
//! never the controller; an owner of controlled state pushes its new value
//! back with `sync_input_value` / `sync_selected_key`.
//!
//! # Example
//! ```
//! use fpick_core::{Collection, Item, TextFilter};
//! use fpick_state::{PickerController, TriggerReason};
//!
//! let items = Collection::from_items([
//!     Item::text("rs", "Rust"),
//!     Item::text("py", "Python"),
//! ])
//! .unwrap();
//! let mut picker = PickerController::builder(items)
//!     .filter(TextFilter::contains())
//!     .build()
//!     .unwrap();
//!
//! picker.set_input_value("ru");
//! picker.open(None, Some(TriggerReason::Input));
//! picker.focus_first();
//! picker.commit();
//!
//! assert_eq!(picker.selected_key().map(|k| k.as_str()), Some("rs"));
//! assert_eq!(picker.input_value(), "");
//! assert!(!picker.is_open());
//! ```

use std::collections::HashSet;
use std::fmt;

#[cfg(feature = "tracing")]
use fpick_core::logging::LOG_TARGET;
use fpick_core::{Collection, Item, Key, debug, warn};

use crate::builder::PickerBuilder;
use crate::config::{MenuTriggerMode, PickerConfig};
use crate::controllable::Request;
use crate::query::QueryFilter;
use crate::selection::{SelectionManager, SingleSelectList};
use crate::trigger::{FocusStrategy, MenuTrigger, Transition, TriggerReason};

/// Open-change hook: `(is_open, trigger_reason)`. The reason is `None` on close.
pub type OpenChangeHook = Box<dyn FnMut(bool, Option<TriggerReason>)>;

/// A write of the open flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenRequest {
    Open(Option<FocusStrategy>, Option<TriggerReason>),
    Toggle(Option<FocusStrategy>, Option<TriggerReason>),
    Close,
}

/// State controller for a searchable single-select picker.
pub struct PickerController<T> {
    list: SingleSelectList<T>,
    trigger: MenuTrigger,
    query: QueryFilter<T>,
    config: PickerConfig,
    focused: bool,
    on_open_change: Option<OpenChangeHook>,
}

impl<T: Clone> PickerController<T> {
    /// Start building a controller over `items`.
    pub fn builder(items: Collection<T>) -> PickerBuilder<T> {
        PickerBuilder::new(items)
    }

    pub(crate) fn from_parts(
        list: SingleSelectList<T>,
        query: QueryFilter<T>,
        config: PickerConfig,
        on_open_change: Option<OpenChangeHook>,
    ) -> Self {
        Self {
            list,
            trigger: MenuTrigger::new(),
            query,
            config,
            focused: false,
            on_open_change,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Effective query text.
    pub fn input_value(&self) -> &str {
        self.query.query()
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.trigger.is_open()
    }

    /// Why the menu was last opened.
    pub fn trigger_reason(&self) -> Option<TriggerReason> {
        self.trigger.trigger_reason()
    }

    /// Focus strategy of the current open.
    pub fn focus_strategy(&self) -> Option<FocusStrategy> {
        self.trigger.focus_strategy()
    }

    /// Focus and selection pointers.
    pub fn selection_manager(&self) -> &SelectionManager {
        self.list.selection_manager()
    }

    /// The selection substrate.
    pub fn list(&self) -> &SingleSelectList<T> {
        &self.list
    }

    /// Authoritative selected key.
    pub fn selected_key(&self) -> Option<&Key> {
        self.list.selected_key()
    }

    /// Item behind the selected key, if it still exists.
    pub fn selected_item(&self) -> Option<&Item<T>> {
        self.list.selected_item()
    }

    /// Disabled keys.
    pub fn disabled_keys(&self) -> &HashSet<Key> {
        self.list.disabled_keys()
    }

    /// Focused candidate, if any.
    pub fn focused_key(&self) -> Option<&Key> {
        self.list.selection_manager().focused_key()
    }

    /// The visible collection.
    pub fn collection(&self) -> &Collection<T> {
        self.query.derived()
    }

    /// The full collection.
    pub fn original_collection(&self) -> &Collection<T> {
        self.list.collection()
    }

    /// Whether the visible collection ignores the query.
    pub fn show_all_items(&self) -> bool {
        self.query.show_all()
    }

    /// Text of the selection as of the last controlled finalize.
    pub fn last_committed_value(&self) -> &str {
        self.query.last_committed()
    }

    /// Whether the query input has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Behaviour configuration.
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Open / close
    // -----------------------------------------------------------------------

    /// Request the menu to open.
    ///
    /// Suppressed (no state change, no hooks) when nothing could be shown.
    /// A manual open, or a focus open in [`MenuTriggerMode::Focus`], shows
    /// every candidate regardless of the query.
    pub fn open(
        &mut self,
        focus_strategy: Option<FocusStrategy>,
        trigger: Option<TriggerReason>,
    ) -> Transition {
        if !self.prepare_open(trigger) {
            return Transition::Unchanged;
        }
        self.set_open(OpenRequest::Open(focus_strategy, trigger))
    }

    /// Open a closed menu (same rules as [`Self::open`]) or close an open one.
    pub fn toggle(
        &mut self,
        focus_strategy: Option<FocusStrategy>,
        trigger: Option<TriggerReason>,
    ) -> Transition {
        if !self.trigger.is_open() && !self.prepare_open(trigger) {
            return Transition::Unchanged;
        }
        self.set_open(OpenRequest::Toggle(focus_strategy, trigger))
    }

    /// Commit and close. Same as [`Self::commit`].
    pub fn close(&mut self) {
        self.commit();
    }

    /// Close the menu without touching the query or the selection.
    pub fn close_menu(&mut self) -> Transition {
        self.set_open(OpenRequest::Close)
    }

    /// Check the suppression rule and enter the show-all view when the open
    /// displays every candidate. Returns whether the open may proceed.
    fn prepare_open(&mut self, trigger: Option<TriggerReason>) -> bool {
        let display_all = match trigger {
            Some(TriggerReason::Manual) => true,
            Some(TriggerReason::Focus) => self.config.menu_trigger == MenuTriggerMode::Focus,
            Some(TriggerReason::Input) | None => false,
        };
        let external = self.query.is_external();
        let allowed = !self.query.derived().is_empty()
            || (display_all && !self.list.collection().is_empty())
            || external
            || self.config.allows_empty_collection;
        if !allowed {
            debug!(target: LOG_TARGET, trigger = ?trigger, "open suppressed: nothing to show");
            return false;
        }
        if display_all && !self.trigger.is_open() && !external {
            self.query.set_show_all(true, self.list.collection());
        }
        true
    }

    /// The only writer of the open flag.
    fn set_open(&mut self, request: OpenRequest) -> Transition {
        let transition = match request {
            OpenRequest::Open(strategy, reason) => self.trigger.open(strategy, reason),
            OpenRequest::Toggle(strategy, reason) => self.trigger.toggle(strategy, reason),
            OpenRequest::Close => self.trigger.close(),
        };
        match transition {
            Transition::Opened => {
                let reason = self.trigger.trigger_reason();
                debug!(target: LOG_TARGET, reason = ?reason, "menu opened");
                let visible = self.query.derived();
                let manager = self.list.selection_manager_mut();
                match self.trigger.focus_strategy() {
                    Some(FocusStrategy::First) => {
                        manager.focus_first(visible);
                    }
                    Some(FocusStrategy::Last) => {
                        manager.focus_last(visible);
                    }
                    None => {}
                }
                if let Some(hook) = self.on_open_change.as_mut() {
                    hook(true, reason);
                }
            }
            Transition::Closed => {
                debug!(target: LOG_TARGET, "menu closed");
                self.list.selection_manager_mut().clear_focus();
                self.query.set_show_all(false, self.list.collection());
                if let Some(hook) = self.on_open_change.as_mut() {
                    hook(false, None);
                }
            }
            Transition::Unchanged => {}
        }
        transition
    }

    /// Close when the visible collection ran empty and that is not allowed.
    fn close_if_empty(&mut self) {
        if self.trigger.is_open()
            && !self.query.is_external()
            && !self.config.allows_empty_collection
            && self.query.derived().is_empty()
        {
            debug!(target: LOG_TARGET, "no visible candidates; closing");
            self.set_open(OpenRequest::Close);
        }
    }

    // -----------------------------------------------------------------------
    // Commit / revert
    // -----------------------------------------------------------------------

    /// Commit the focused candidate, or finalize the current selection.
    ///
    /// With an open menu and a focused candidate that differs from the
    /// selection, the focused key becomes the selected key; the selection
    /// change then resets the query and closes the menu. Otherwise this is
    /// [`Self::finalize_selection`].
    pub fn commit(&mut self) {
        let focused = self.focused_key().cloned();
        match focused {
            Some(key) if self.trigger.is_open() && self.selected_key() != Some(&key) => {
                debug!(target: LOG_TARGET, key = key.as_str(), "committing focused candidate");
                if !self.set_selected_key(Some(key)).notified() {
                    self.finalize_selection();
                }
            }
            _ => self.finalize_selection(),
        }
    }

    /// Finalize the current selection and close.
    ///
    /// When both the selected key and the query are controlled, the owner is
    /// re-notified of the selected key and the query is left alone; the
    /// selected candidate's text is remembered as the last committed value.
    /// Otherwise the query is reset to empty.
    pub fn finalize_selection(&mut self) {
        let selection_controlled = self.list.selection_manager().is_selection_controlled();
        if selection_controlled && self.query.is_controlled() {
            self.list.selection_manager_mut().notify_selection();
            let text = self
                .list
                .selected_item()
                .map(|item| item.text_value().to_owned())
                .unwrap_or_default();
            debug!(target: LOG_TARGET, committed = text.as_str(), "finalized controlled selection");
            self.query.set_last_committed(text);
        } else {
            self.reset_input_value();
        }
        self.set_open(OpenRequest::Close);
    }

    /// Abandon the interaction. Behaves exactly like
    /// [`Self::finalize_selection`].
    pub fn revert(&mut self) {
        self.finalize_selection();
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Request a new selected key.
    ///
    /// A request that reaches the selection hook (stored or forwarded) resets
    /// the query and closes the menu after the hook returns. Disabled keys and
    /// the current key are refused silently.
    pub fn set_selected_key(&mut self, key: Option<Key>) -> Request {
        if key.as_ref().is_some_and(|k| self.disabled_keys().contains(k)) {
            warn!(target: LOG_TARGET, key = ?key, "refused selection of disabled key");
            return Request::Unchanged;
        }
        let request = self.list.set_selected_key(key);
        if request.notified() {
            debug!(target: LOG_TARGET, request = ?request, "selection changed");
            self.reset_input_value();
            self.set_open(OpenRequest::Close);
        }
        request
    }

    /// Accept the owner's authoritative selected key. Never fires hooks.
    pub fn sync_selected_key(&mut self, key: Option<Key>) -> bool {
        self.list.selection_manager_mut().sync_selected(key)
    }

    /// Replace the disabled keys. A focused key that becomes disabled loses
    /// focus.
    pub fn set_disabled_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.list
            .selection_manager_mut()
            .set_disabled(keys.into_iter().collect());
    }

    // -----------------------------------------------------------------------
    // Query
    // -----------------------------------------------------------------------

    /// Replace the query, as when the user types.
    ///
    /// A controlled query is only forwarded; the state reacts once the owner
    /// calls [`Self::sync_input_value`].
    pub fn set_input_value(&mut self, text: impl Into<String>) -> Request {
        let request = self.query.set_query(text.into(), self.list.collection());
        if request == Request::Stored {
            self.after_query_change(true);
        }
        request
    }

    /// Accept the owner's authoritative query. Never fires hooks.
    pub fn sync_input_value(&mut self, text: impl Into<String>) -> bool {
        let changed = self.query.sync_query(text.into(), self.list.collection());
        if changed {
            self.after_query_change(true);
        }
        changed
    }

    fn reset_input_value(&mut self) {
        if self.query.set_query(String::new(), self.list.collection()) == Request::Stored {
            self.after_query_change(false);
        }
    }

    /// React to a query that changed the visible collection.
    fn after_query_change(&mut self, typed: bool) {
        self.list.selection_manager_mut().clear_focus();
        if self.trigger.is_open() {
            self.close_if_empty();
        } else if typed
            && self.focused
            && self.config.menu_trigger != MenuTriggerMode::Manual
            && !self.query.query().is_empty()
        {
            self.open(None, Some(TriggerReason::Input));
        }
    }

    // -----------------------------------------------------------------------
    // Items and input focus
    // -----------------------------------------------------------------------

    /// Replace the candidate collection.
    pub fn set_items(&mut self, items: Collection<T>) {
        self.list.set_collection(items);
        self.query.recompute(self.list.collection());
        self.list
            .selection_manager_mut()
            .retain_focus_in(self.query.derived());
        self.close_if_empty();
    }

    /// Record focus or blur of the query input.
    ///
    /// Focus opens the menu in [`MenuTriggerMode::Focus`]. Blur finalizes an
    /// open menu when `should_close_on_blur` is set.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        if focused {
            if self.config.menu_trigger == MenuTriggerMode::Focus {
                self.open(None, Some(TriggerReason::Focus));
            }
        } else if self.config.should_close_on_blur && self.trigger.is_open() {
            self.finalize_selection();
        }
    }

    // -----------------------------------------------------------------------
    // Candidate focus
    // -----------------------------------------------------------------------

    /// Focus `key` in the visible collection. `None` clears focus.
    ///
    /// Refused while the menu is closed, and for sections, disabled keys and
    /// keys outside the visible collection.
    pub fn set_focused_key(&mut self, key: Option<Key>) -> bool {
        if key.is_some() && !self.trigger.is_open() {
            return false;
        }
        self.list
            .selection_manager_mut()
            .focus(key, self.query.derived())
    }

    /// Move focus to the next focusable candidate.
    pub fn focus_next(&mut self) -> bool {
        self.trigger.is_open()
            && self
                .list
                .selection_manager_mut()
                .focus_next(self.query.derived(), self.config.wrap_focus)
    }

    /// Move focus to the previous focusable candidate.
    pub fn focus_previous(&mut self) -> bool {
        self.trigger.is_open()
            && self
                .list
                .selection_manager_mut()
                .focus_previous(self.query.derived(), self.config.wrap_focus)
    }

    /// Focus the first focusable candidate.
    pub fn focus_first(&mut self) -> bool {
        self.trigger.is_open()
            && self
                .list
                .selection_manager_mut()
                .focus_first(self.query.derived())
    }

    /// Focus the last focusable candidate.
    pub fn focus_last(&mut self) -> bool {
        self.trigger.is_open()
            && self
                .list
                .selection_manager_mut()
                .focus_last(self.query.derived())
    }
}

impl<T: fmt::Debug> fmt::Debug for PickerController<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerController")
            .field("list", &self.list)
            .field("trigger", &self.trigger)
            .field("query", &self.query)
            .field("config", &self.config)
            .field("focused", &self.focused)
            .field("has_open_hook", &self.on_open_change.is_some())
            .finish()
    }
}
