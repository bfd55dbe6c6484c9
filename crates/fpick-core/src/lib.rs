#![forbid(unsafe_code)]

//! Core data model for FrankenPick: candidate keys, candidate trees,
//! collections, and filter predicates.

pub mod collection;
pub mod error;
pub mod filter;
pub mod key;
pub mod logging;

pub use collection::{Collection, Item, Items, Node, Section};
pub use error::{CollectionError, CollectionResult};
pub use filter::{FilterPredicate, MatchMode, Sensitivity, TextFilter};
pub use key::Key;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
