//! File-backed record persistence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::warn;

use crate::store::criteria::Criteria;
use crate::store::error::Error;
use crate::store::record::Record;

/// Handle to the persisted record sequence.
///
/// The store is read-then-write with no locking: safe under the server's
/// one-connection-at-a-time scheduling model, which is the only consumer.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Create a store handle backed by the file at `path`.
    ///
    /// The file is not touched until the first append; a store over a
    /// nonexistent file simply reads as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append a new record and persist the full sequence.
    ///
    /// The next id is `1` for an empty store, otherwise `last.id + 1`.
    pub fn append(&self, first: &str, last: &str) -> Result<Record, Error> {
        let mut records = self.load();

        let record = Record {
            id: records.last().map_or(1, |r| r.id + 1),
            first: first.to_string(),
            last: last.to_string(),
        };
        records.push(record.clone());

        self.save(&records)?;
        Ok(record)
    }

    /// Return the records matching `criteria`, in insertion order.
    ///
    /// A missing, truncated, or corrupt file reads as an empty sequence.
    pub fn query(&self, criteria: &Criteria) -> Vec<Record> {
        self.load()
            .into_iter()
            .filter(|record| criteria.matches(record))
            .collect()
    }

    fn load(&self) -> Vec<Record> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(records) => records,
            Err(err) => {
                warn!("Unreadable record file {path}: {err}", path = self.path.display());
                Vec::new()
            }
        }
    }

    fn save(&self, records: &[Record]) -> Result<(), Error> {
        // Write to a temp file, then rename over the original so a reader
        // never observes a half-written sequence.
        let temp_path = self.path.with_extension("tmp");
        let mut writer = BufWriter::new(File::create(&temp_path)?);
        serde_json::to_writer(&mut writer, records)?;
        writer.flush()?;

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
