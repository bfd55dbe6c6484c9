#![forbid(unsafe_code)]

//! FrankenPick public facade crate.
//!
//! Re-exports the candidate model from `fpick-core` and the picker controller
//! from `fpick-state`, plus a top-level [`Error`] and a prelude.
//!
//! ```
//! use fpick::prelude::*;
//!
//! fn palette() -> fpick::Result<PickerController<()>> {
//!     let items = Collection::from_items([
//!         Item::text("open", "Open File"),
//!         Item::text("save", "Save File"),
//!         Item::text("quit", "Quit"),
//!     ])?;
//!     Ok(PickerController::builder(items)
//!         .filter(TextFilter::contains())
//!         .build()?)
//! }
//!
//! let mut picker = palette().unwrap();
//! picker.set_focused(true);
//! picker.set_input_value("file");
//! assert!(picker.is_open());
//! assert_eq!(picker.collection().leaf_count(), 2);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use fpick_core::{
    Collection, CollectionError, FilterPredicate, Item, Items, Key, MatchMode, Node, Section,
    Sensitivity, TextFilter,
};

// --- State re-exports ------------------------------------------------------

#[cfg(feature = "config-json")]
pub use fpick_state::ConfigError;
pub use fpick_state::{
    BuildError, Controllable, FocusStrategy, MenuTriggerMode, PickerBuilder, PickerConfig,
    PickerController, Request, SelectionManager, Transition, TriggerReason,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for FrankenPick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The candidate tree was invalid.
    Collection(CollectionError),
    /// The controller could not be built.
    Build(BuildError),
    /// A config could not be loaded or saved.
    #[cfg(feature = "config-json")]
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection(err) => write!(f, "{err}"),
            Self::Build(err) => write!(f, "{err}"),
            #[cfg(feature = "config-json")]
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Collection(err) => Some(err),
            Self::Build(err) => Some(err),
            #[cfg(feature = "config-json")]
            Self::Config(err) => Some(err),
        }
    }
}

impl From<CollectionError> for Error {
    fn from(err: CollectionError) -> Self {
        Self::Collection(err)
    }
}

impl From<BuildError> for Error {
    fn from(err: BuildError) -> Self {
        Self::Build(err)
    }
}

#[cfg(feature = "config-json")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for FrankenPick APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Collection, Error, FocusStrategy, Item, Key, MenuTriggerMode, Node, PickerConfig,
        PickerController, Result, Section, TextFilter, TriggerReason,
    };

    pub use crate::{core, state};
}

pub use fpick_core as core;
pub use fpick_state as state;
