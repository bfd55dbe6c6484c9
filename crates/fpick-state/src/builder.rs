#![forbid(unsafe_code)]

//! Builder for [`PickerController`].

use std::collections::HashSet;

use fpick_core::{Collection, FilterPredicate, Key};

use crate::config::PickerConfig;
use crate::controllable::{ChangeHook, Controllable};
use crate::controller::{OpenChangeHook, PickerController};
use crate::error::BuildError;
use crate::query::{ItemSource, QueryFilter};
use crate::selection::{SelectionManager, SingleSelectList};
use crate::trigger::TriggerReason;

/// Initial value of a slot and who owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot<T> {
    Uncontrolled(T),
    Controlled(T),
}

impl<T: PartialEq> Slot<T> {
    fn into_cell(self, hook: Option<ChangeHook<T>>) -> Controllable<T> {
        let cell = match self {
            Slot::Uncontrolled(v) => Controllable::uncontrolled(v),
            Slot::Controlled(v) => Controllable::controlled(v),
        };
        cell.with_hook(hook)
    }
}

/// Configures and validates a [`PickerController`].
///
/// Items owned by the picker need a filter predicate; items marked external
/// are shown verbatim and need none.
pub struct PickerBuilder<T> {
    items: Collection<T>,
    predicate: Option<Box<dyn FilterPredicate>>,
    external: bool,
    input: Slot<String>,
    selected: Slot<Option<Key>>,
    disabled: HashSet<Key>,
    on_input_change: Option<ChangeHook<String>>,
    on_selection_change: Option<ChangeHook<Option<Key>>>,
    on_open_change: Option<OpenChangeHook>,
    config: PickerConfig,
}

impl<T: Clone> PickerBuilder<T> {
    /// Start from `items` with an empty, uncontrolled query and no selection.
    pub fn new(items: Collection<T>) -> Self {
        Self {
            items,
            predicate: None,
            external: false,
            input: Slot::Uncontrolled(String::new()),
            selected: Slot::Uncontrolled(None),
            disabled: HashSet::new(),
            on_input_change: None,
            on_selection_change: None,
            on_open_change: None,
            config: PickerConfig::default(),
        }
    }

    /// Predicate deciding which candidates match the query.
    #[must_use]
    pub fn filter(mut self, predicate: impl FilterPredicate + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Items are supplied and filtered by the caller; show them verbatim.
    #[must_use]
    pub fn external_items(mut self) -> Self {
        self.external = true;
        self
    }

    /// Controlled query: the caller owns it and pushes changes back with
    /// `sync_input_value`.
    #[must_use]
    pub fn input_value(mut self, value: impl Into<String>) -> Self {
        self.input = Slot::Controlled(value.into());
        self
    }

    /// Initial value of a locally owned query.
    #[must_use]
    pub fn default_input_value(mut self, value: impl Into<String>) -> Self {
        self.input = Slot::Uncontrolled(value.into());
        self
    }

    /// Controlled selection: the caller owns it and pushes changes back with
    /// `sync_selected_key`.
    #[must_use]
    pub fn selected_key(mut self, key: Option<Key>) -> Self {
        self.selected = Slot::Controlled(key);
        self
    }

    /// Initial value of a locally owned selection.
    #[must_use]
    pub fn default_selected_key(mut self, key: Option<Key>) -> Self {
        self.selected = Slot::Uncontrolled(key);
        self
    }

    /// Keys that can be neither focused nor selected.
    #[must_use]
    pub fn disabled_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.disabled = keys.into_iter().collect();
        self
    }

    /// Called with every requested query.
    #[must_use]
    pub fn on_input_change(mut self, mut hook: impl FnMut(&str) + 'static) -> Self {
        self.on_input_change = Some(Box::new(move |text: &String| hook(text.as_str())));
        self
    }

    /// Called with every requested selected key.
    #[must_use]
    pub fn on_selection_change(mut self, mut hook: impl FnMut(Option<&Key>) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(move |key: &Option<Key>| hook(key.as_ref())));
        self
    }

    /// Called on every open-flag transition.
    #[must_use]
    pub fn on_open_change(
        mut self,
        hook: impl FnMut(bool, Option<TriggerReason>) + 'static,
    ) -> Self {
        self.on_open_change = Some(Box::new(hook));
        self
    }

    /// Behaviour configuration.
    #[must_use]
    pub fn config(mut self, config: PickerConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate and build the controller.
    pub fn build(self) -> Result<PickerController<T>, BuildError> {
        let source = match (self.external, self.predicate) {
            (true, _) => ItemSource::External,
            (false, Some(predicate)) => ItemSource::Filtered(predicate),
            (false, None) => return Err(BuildError::MissingFilter),
        };
        let query = QueryFilter::new(
            self.input.into_cell(self.on_input_change),
            source,
            &self.items,
        );
        let manager = SelectionManager::new(
            self.selected.into_cell(self.on_selection_change),
            self.disabled,
        );
        let list = SingleSelectList::new(self.items, manager);
        Ok(PickerController::from_parts(
            list,
            query,
            self.config,
            self.on_open_change,
        ))
    }
}
