//! Error types for the jtran core library
//!
//! This module defines the engine-level error handling for jtran, using
//! thiserror for the error definitions. Keyword handlers report failures
//! through [`KeywordError`](crate::transform::KeywordError), which the
//! engine wraps with the keyword name and the schema key it was applied to.

use crate::transform::KeywordError;
use thiserror::Error;

/// Main error type for jtran operations
#[derive(Error, Debug)]
pub enum Error {
    /// A keyword handler failed while running a pipeline
    #[error("error applying keyword '{keyword}': {source}")]
    Keyword {
        keyword: String,
        #[source]
        source: KeywordError,
    },

    /// Pipeline step names a keyword nobody registered (strict mode only)
    #[error("unknown keyword '{keyword}'")]
    UnknownKeyword { keyword: String },

    /// A schema key failed to resolve
    #[error("failed to apply keywords to key '{key}': {source}")]
    KeyResolution {
        key: String,
        #[source]
        source: Box<Error>,
    },

    /// A schema key resolved to something other than a string
    #[error("key '{key}' did not resolve to a string")]
    NonStringKey { key: String },

    /// A string value failed to resolve
    #[error("failed to apply keywords to value of key '{key}': {source}")]
    Value {
        key: String,
        #[source]
        source: Box<Error>,
    },

    /// A nested schema object failed to transform
    #[error("failed to transform nested schema for key '{key}': {source}")]
    Nested {
        key: String,
        #[source]
        source: Box<Error>,
    },

    /// An element of a schema array failed to transform
    #[error("failed to transform array item {index} under key '{key}': {source}")]
    ArrayItem {
        key: String,
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// Top-level schema was not an object
    #[error("schema must be an object, found {found}")]
    InvalidSchema { found: String },

    /// Schema nesting went past the configured limit
    #[error("schema nesting exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Walk the wrapping chain down to the innermost engine error
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::KeyResolution { source, .. }
            | Error::Value { source, .. }
            | Error::Nested { source, .. }
            | Error::ArrayItem { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
