//! Postcard Store
//!
//! Owns the record sequence and its indexes:
//! - Ingest path: text → parse every line → commit all → index new positions
//! - Read path: query → index positions → raw lines from the sequence
//!
//! Ingestion is all-or-nothing. A batch is fully parsed before any record
//! is pushed, so a format error leaves the store untouched.

use crate::index::{IndexManager, IndexStats, Position};
use crate::store::error::StoreResult;
use crate::store::file;
use crate::store::parse::parse_text;
use crate::store::types::{DateRange, Postcard, WriteMode};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// In-memory postcard list with date, sender and receiver indexes
#[derive(Debug, Default, Clone)]
pub struct PostcardStore {
    /// Authoritative record sequence, in read/append order
    records: Vec<Postcard>,
    /// Positions into `records`, keyed three ways
    indexes: IndexManager,
    /// File the list was last loaded from
    source: Option<PathBuf>,
}

impl PostcardStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Ingest ====================

    /// Load postcards from the raw text of a postcard file
    ///
    /// Records are added after any already held.
    pub fn load(&mut self, text: &str) -> StoreResult<usize> {
        let added = self.ingest(text)?;
        tracing::debug!("Loaded {} postcards ({} total)", added, self.count());
        Ok(added)
    }

    /// Append new postcards after the existing ones
    ///
    /// Existing positions are untouched; only the new ones are indexed.
    pub fn append(&mut self, text: &str) -> StoreResult<usize> {
        let added = self.ingest(text)?;
        tracing::debug!("Appended {} postcards ({} total)", added, self.count());
        Ok(added)
    }

    /// Read a postcard file and load it, remembering it as the source
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> StoreResult<usize> {
        let path = path.as_ref();
        let text = file::read_text(path)?;
        let added = self.load(&text)?;
        self.source = Some(path.to_path_buf());

        tracing::info!("Loaded {} postcards from {:?}", added, path);
        Ok(added)
    }

    /// Read newly received postcards from a file and append them
    pub fn append_file(&mut self, path: impl AsRef<Path>) -> StoreResult<usize> {
        let path = path.as_ref();
        let text = file::read_text(path)?;
        let added = self.append(&text)?;

        tracing::info!("Appended {} postcards from {:?}", added, path);
        Ok(added)
    }

    fn ingest(&mut self, text: &str) -> StoreResult<usize> {
        let parsed = match parse_text(text) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Rejected postcard batch, store unchanged: {}", e);
                return Err(e);
            }
        };

        let added = parsed.len();
        self.records.reserve(added);

        for postcard in parsed {
            let position = self.records.len();
            self.indexes.add(position, &postcard);
            self.records.push(postcard);
        }

        Ok(added)
    }

    // ==================== Persistence ====================

    /// Write every raw record, one per line, to `path`
    pub fn save(&self, path: impl AsRef<Path>, mode: WriteMode) -> StoreResult<()> {
        let path = path.as_ref();
        file::write_text(path, &self.render(), mode)?;

        tracing::info!("Saved {} postcards to {:?} ({})", self.count(), path, mode);
        Ok(())
    }

    /// Write the list to `path`, replacing its content
    pub fn save_to(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        self.save(path, WriteMode::Overwrite)
    }

    /// Add the list after whatever `path` already holds
    pub fn update_file(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        self.save(path, WriteMode::Append)
    }

    /// The verbatim line-per-record dump written by `save`
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.records.iter().map(|p| p.raw().len() + 1).sum());
        for postcard in &self.records {
            out.push_str(postcard.raw());
            out.push('\n');
        }
        out
    }

    // ==================== Queries ====================

    /// Number of postcards held
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Postcards dated within `[start, end]`, ascending by date
    ///
    /// Postcards sharing a date keep their insertion order. An inverted
    /// range returns nothing.
    pub fn query_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<&str> {
        self.query_range(DateRange::new(start, end))
    }

    /// Same as `query_by_date_range` for a `DateRange` value
    pub fn query_range(&self, range: DateRange) -> Vec<&str> {
        self.raw_at(&self.indexes.find_by_date_range(range))
    }

    /// Postcards whose sender is exactly `sender`, in insertion order
    pub fn query_by_sender(&self, sender: &str) -> Vec<&str> {
        self.raw_at(self.indexes.find_by_sender(sender))
    }

    /// Postcards whose receiver is exactly `receiver`, in insertion order
    pub fn query_by_receiver(&self, receiver: &str) -> Vec<&str> {
        self.raw_at(self.indexes.find_by_receiver(receiver))
    }

    fn raw_at(&self, positions: &[Position]) -> Vec<&str> {
        positions
            .iter()
            .map(|&position| self.records[position].raw())
            .collect()
    }

    // ==================== Introspection ====================

    pub fn get(&self, position: Position) -> Option<&Postcard> {
        self.records.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Postcard> {
        self.records.iter()
    }

    /// File this list was last loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Distinct senders, sorted
    pub fn senders(&self) -> Vec<String> {
        self.indexes.senders()
    }

    /// Distinct receivers, sorted
    pub fn receivers(&self) -> Vec<String> {
        self.indexes.receivers()
    }

    /// Distinct dates, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.indexes.dates()
    }

    pub fn stats(&self) -> IndexStats {
        self.indexes.stats()
    }

    /// Verify that the indexes agree with the record sequence
    pub fn check_consistency(&self) -> Result<(), String> {
        self.indexes.check(&self.records)
    }
}

impl<'a> IntoIterator for &'a PostcardStore {
    type Item = &'a Postcard;
    type IntoIter = std::slice::Iter<'a, Postcard>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
