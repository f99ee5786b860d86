//! Error types for the dictionary

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Dictionary error type
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing the data file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A word that cannot be stored in the data file
    #[error("invalid word {0:?}: words must be non-empty and fit on a single line")]
    InvalidWord(String),

    /// The underlying map rejected an operation
    #[error("map error: {0}")]
    Map(#[from] llrb::Error),
}

impl Error {
    /// Create an invalid word error
    pub fn invalid_word(word: impl Into<String>) -> Self {
        Error::InvalidWord(word.into())
    }
}
