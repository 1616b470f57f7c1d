//! Exact-match record filtering.

use crate::store::error::Error;
use crate::store::record::Record;

/// A query filter over records.
///
/// Each field is an optional exact-match constraint; all set fields must
/// match for a record to be selected (logical AND). The setters take the raw
/// text form a caller would have: an empty string clears the constraint, and
/// an id value is parsed as an integer before it is ever compared.
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    id: Option<u64>,
    first: Option<String>,
    last: Option<String>,
}

impl Criteria {
    /// An empty filter that matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrain the id field. An empty value removes the constraint.
    pub fn with_id(mut self, raw: &str) -> Result<Self, Error> {
        self.id = if raw.is_empty() {
            None
        } else {
            Some(raw.parse()?)
        };
        Ok(self)
    }

    /// Constrain the first-name field. An empty value removes the constraint.
    pub fn with_first(mut self, raw: &str) -> Self {
        self.first = (!raw.is_empty()).then(|| raw.to_string());
        self
    }

    /// Constrain the last-name field. An empty value removes the constraint.
    pub fn with_last(mut self, raw: &str) -> Self {
        self.last = (!raw.is_empty()).then(|| raw.to_string());
        self
    }

    /// Whether a record satisfies every set constraint.
    pub fn matches(&self, record: &Record) -> bool {
        self.id.map_or(true, |id| record.id == id)
            && self.first.as_deref().map_or(true, |first| record.first == first)
            && self.last.as_deref().map_or(true, |last| record.last == last)
    }
}
