//! Error types for the record store.

use thiserror::Error;

/// Errors that can occur while appending to or querying the store.
///
/// Only writes fail loudly; an unreadable or corrupt file on the read side is
/// treated as an empty sequence instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The persistence medium could not be written.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The record sequence could not be serialized.
    #[error("Storage serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An id criteria value is not an integer.
    #[error("Invalid id value: {0}")]
    InvalidId(#[from] std::num::ParseIntError),
}
