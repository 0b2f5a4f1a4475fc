//! Postcard Index Structures
//!
//! Secondary indexes over the record sequence. Each maps a key to the
//! ordered list of positions holding that key; none of them own records.
//!
//! - **DateIndex**: ordered map, answers inclusive date ranges in date order
//! - **PartyIndex**: hash map keyed by name, used once for senders and once
//!   for receivers
//! - **IndexManager**: keeps all three in step with the record sequence
//!
//! # Architecture
//!
//! ```text
//! records:   [0] 2019-05-01 Alice→Bob   [1] 2019-05-03 Carol→Bob   [2] 2019-05-01 Bob→Alice
//!
//! by_date:     2019-05-01 → [0, 2]   2019-05-03 → [1]
//! by_sender:   Alice → [0]   Carol → [1]   Bob → [2]
//! by_receiver: Bob → [0, 1]   Alice → [2]
//! ```

mod date_index;
mod manager;
mod party_index;

pub use date_index::DateIndex;
pub use manager::IndexManager;
pub use party_index::PartyIndex;

use chrono::NaiveDate;
use serde::Serialize;

/// Position of a record within the record sequence
pub type Position = usize;

/// Statistics about index contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Number of records indexed
    pub records: usize,
    /// Number of distinct dates
    pub dates: usize,
    /// Number of distinct senders
    pub senders: usize,
    /// Number of distinct receivers
    pub receivers: usize,
    /// Earliest date held, if any
    pub first_date: Option<NaiveDate>,
    /// Latest date held, if any
    pub last_date: Option<NaiveDate>,
}

impl std::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} postcards, {} dates, {} senders, {} receivers",
            self.records, self.dates, self.senders, self.receivers
        )?;
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            write!(f, " ({} to {})", first, last)?;
        }
        Ok(())
    }
}
