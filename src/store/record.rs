//! The persisted record type.

use serde::{Deserialize, Serialize};

/// One stored user entry.
///
/// Ids are dense-increasing starting at 1 in insertion order; they are never
/// reused or reassigned. Records are created only by
/// [`RecordStore::append`](crate::store::RecordStore::append) and never
/// mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique, monotonically assigned identifier.
    pub id: u64,
    /// First name.
    pub first: String,
    /// Last name.
    pub last: String,
}
