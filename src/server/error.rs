//! Error types for the HTTP server.

use thiserror::Error;

use crate::parser::Error as ParserError;
use crate::store::Error as StoreError;

/// Errors that can occur while serving a connection.
///
/// All of these are scoped to the single connection they occurred on: the
/// response is abandoned and the connection dropped, while the accept loop
/// keeps running.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("Parse error: {0}")]
    Parse(#[from] ParserError),

    /// Error reading or writing the record store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A header the route depends on is missing from the request.
    #[error("Required header is missing: {0}")]
    MissingHeader(String),
}
