#![forbid(unsafe_code)]

//! The query/filter layer.
//!
//! Owns the query text and derives the visible collection from the original
//! one. Derivation is a pure function of the original collection, the query,
//! the predicate, whether the items are externally supplied, and the
//! "show all items" flag:
//!
//! | source | show all | visible |
//! |--------|----------|---------|
//! | external | any | original, verbatim |
//! | filtered | true | original |
//! | filtered | false | `original.filter(query, predicate)` |

use std::fmt;

#[cfg(feature = "tracing")]
use fpick_core::logging::LOG_TARGET;
use fpick_core::{Collection, FilterPredicate, trace};

use crate::controllable::{Controllable, Request};

/// Where the candidates come from.
pub enum ItemSource {
    /// Candidates owned by the picker and filtered by the predicate.
    Filtered(Box<dyn FilterPredicate>),
    /// Candidates supplied by an external controller, shown verbatim.
    External,
}

impl ItemSource {
    /// Whether the candidates bypass filtering.
    pub fn is_external(&self) -> bool {
        matches!(self, ItemSource::External)
    }
}

impl fmt::Debug for ItemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemSource::Filtered(_) => f.write_str("Filtered(..)"),
            ItemSource::External => f.write_str("External"),
        }
    }
}

/// Query text, derived collection, and "show all items" flag.
#[derive(Debug)]
pub struct QueryFilter<T> {
    query: Controllable<String>,
    source: ItemSource,
    show_all: bool,
    derived: Collection<T>,
    last_committed: String,
}

impl<T: Clone> QueryFilter<T> {
    /// Create the layer and derive the initial view of `original`.
    pub fn new(query: Controllable<String>, source: ItemSource, original: &Collection<T>) -> Self {
        let mut layer = Self {
            query,
            source,
            show_all: false,
            derived: Collection::empty(),
            last_committed: String::new(),
        };
        layer.recompute(original);
        layer
    }

    /// Effective query: the external value if controlled, else the local one.
    pub fn query(&self) -> &str {
        self.query.get()
    }

    /// Whether an external owner controls the query.
    pub fn is_controlled(&self) -> bool {
        self.query.is_controlled()
    }

    /// Whether candidates are externally supplied.
    pub fn is_external(&self) -> bool {
        self.source.is_external()
    }

    /// Whether the full collection is shown regardless of the query.
    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// The visible collection.
    pub fn derived(&self) -> &Collection<T> {
        &self.derived
    }

    /// Text remembered by the last controlled finalize.
    pub fn last_committed(&self) -> &str {
        &self.last_committed
    }

    pub(crate) fn set_last_committed(&mut self, text: String) {
        self.last_committed = text;
    }

    /// Request a new query.
    ///
    /// A stored query leaves the show-all view and re-derives the visible
    /// collection. A forwarded one changes nothing until [`Self::sync_query`].
    pub fn set_query(&mut self, text: String, original: &Collection<T>) -> Request {
        let request = self.query.request(text);
        if request == Request::Stored {
            self.show_all = false;
            self.recompute(original);
        }
        request
    }

    /// Accept the owner's authoritative query. Returns whether it changed.
    pub fn sync_query(&mut self, text: String, original: &Collection<T>) -> bool {
        let changed = self.query.sync(text);
        if changed {
            self.show_all = false;
            self.recompute(original);
        }
        changed
    }

    /// Switch between the full and the filtered view.
    pub fn set_show_all(&mut self, show_all: bool, original: &Collection<T>) {
        if self.show_all != show_all {
            self.show_all = show_all;
            self.recompute(original);
        }
    }

    /// Re-derive the visible collection.
    pub fn recompute(&mut self, original: &Collection<T>) {
        self.derived = derive(original, self.query.get(), &self.source, self.show_all);
        trace!(
            target: LOG_TARGET,
            query = self.query.get().as_str(),
            show_all = self.show_all,
            visible = self.derived.leaf_count(),
            "recomputed visible collection"
        );
    }
}

/// Pure derivation of the visible collection.
pub fn derive<T: Clone>(
    original: &Collection<T>,
    query: &str,
    source: &ItemSource,
    show_all: bool,
) -> Collection<T> {
    match source {
        ItemSource::External => original.clone(),
        ItemSource::Filtered(_) if show_all => original.clone(),
        ItemSource::Filtered(predicate) => original.filter(query, predicate.as_ref()),
    }
}
