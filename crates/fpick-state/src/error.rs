#![forbid(unsafe_code)]

//! Construction errors for the picker controller.

use std::fmt;

/// Why a `PickerBuilder` could not produce a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Items are owned by the picker but no filter predicate was supplied.
    MissingFilter,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MissingFilter => {
                write!(f, "picker needs a filter predicate unless items are external")
            }
        }
    }
}

impl std::error::Error for BuildError {}
