//! A two-language (English to Polish) dictionary built on top of `llrb::OrderedMap`
//!
//! The dictionary is persisted as a plain text file of alternating lines: an English word followed
//! by one of its Polish translations.

pub mod config;
pub mod dictionary;
pub mod menu;
pub mod store;
mod error;

pub use config::Config;
pub use dictionary::{Dictionary, Entry};
pub use error::{Error, Result};
