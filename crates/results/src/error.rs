//! Error types for results parsing

use thiserror::Error;

/// Result type for results parsing
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing a results document.
#[derive(Error, Debug)]
pub enum Error {
    /// The body is not a well-formed results document.
    #[error("Malformed SPARQL results document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document has neither a `results` nor a `boolean` member.
    #[error("SPARQL results document has neither bindings nor a boolean result")]
    MissingResults,
}
