//! Persisted record store.
//!
//! An append-only ordered sequence of user records with auto-incrementing
//! ids, kept as a JSON array on disk. Reads tolerate a missing or corrupt
//! file (they see an empty sequence); writes rewrite the whole file.

mod record;
mod criteria;
mod db;
mod error;

// Re-export public items
pub use record::Record;
pub use criteria::Criteria;
pub use db::RecordStore;
pub use error::Error;
