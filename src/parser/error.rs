//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur during HTTP request parsing.
///
/// Every parse error is fatal to the connection it occurred on: the request
/// is abandoned without a response, and the next connection is unaffected.
#[derive(Debug, Error)]
pub enum Error {
    /// The request is empty.
    #[error("Empty request")]
    EmptyRequest,

    /// The request line does not split into exactly three tokens.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The HTTP method in the request is not supported.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The HTTP version in the request is not recognized.
    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// A header line lacks the `:` separator.
    #[error("Invalid header format")]
    InvalidHeaderFormat,
}
