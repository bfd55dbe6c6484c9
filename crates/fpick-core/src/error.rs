//! Errors raised while assembling collections.

use std::fmt;

use crate::Key;

/// Errors from [`Collection::new`](crate::Collection::new).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// The same key appears twice somewhere in the tree.
    DuplicateKey(Key),
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::DuplicateKey(key) => write!(f, "duplicate candidate key: {key}"),
        }
    }
}

impl std::error::Error for CollectionError {}

/// Result type for collection construction.
pub type CollectionResult<T> = Result<T, CollectionError>;
