//! # Postcards
//!
//! An in-memory, indexed store for postcard messages kept in a plain
//! line-oriented text file:
//!
//! ```text
//! date: 2019-05-01; from: Alice; to: Bob; Hello
//! ```
//!
//! ## Features
//!
//! - **Indexed queries**: by inclusive date range, sender or receiver,
//!   without rescanning the list
//! - **Atomic ingestion**: a batch with one malformed line is rejected whole
//! - **Verbatim persistence**: saved files reproduce the original lines
//!
//! ## Modules
//!
//! - [`store`]: Record store, parser and file access
//! - [`index`]: Date, sender and receiver indexes
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use postcards::{PostcardStore, WriteMode};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = PostcardStore::new();
//!     store.load_file("postcards.txt")?;
//!     store.append_file("incoming.txt")?;
//!
//!     let start = NaiveDate::from_ymd_opt(2019, 5, 1).unwrap();
//!     let end = NaiveDate::from_ymd_opt(2019, 5, 31).unwrap();
//!     for line in store.query_by_date_range(start, end) {
//!         println!("{}", line);
//!     }
//!
//!     store.save("postcards.txt", WriteMode::Overwrite)?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod index;
pub mod store;

// Re-export top-level types for convenience
pub use store::{
    DateRange, Postcard, PostcardStore, RecordError, StoreError, StoreResult, WriteMode,
};

pub use index::{IndexManager, IndexStats, Position};

pub use config::{Config, ConfigError, LoggingConfig, StorageConfig};
