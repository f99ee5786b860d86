//! Error types for the ordered map

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the fallible `OrderedMap` operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The key looked up is not present in the map
    ///
    /// This is an expected outcome of a lookup. Callers decide the fallback.
    #[error("key not found")]
    KeyNotFound,

    /// An operation that requires a non-empty map was called on an empty map
    ///
    /// The payload names the operation. Check `is_empty()` before calling.
    #[error("invalid state: {0} called on an empty map")]
    InvalidState(&'static str),
}

impl Error {
    /// Returns true if this error is `KeyNotFound`
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Error::KeyNotFound)
    }
}
