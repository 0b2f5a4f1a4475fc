//! Postcard Store
//!
//! This module provides the record store and everything it needs:
//!
//! - **types**: `Postcard`, `DateRange`, `WriteMode`
//! - **parse**: line parser for the postcard file format
//! - **file**: whole-file read and overwrite/append write
//! - **engine**: `PostcardStore`, the record sequence plus its indexes
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use postcards::store::PostcardStore;
//!
//! let mut store = PostcardStore::new();
//! store.load("date: 2019-05-01; from: Alice; to: Bob; Hello\n")?;
//!
//! let day = NaiveDate::from_ymd_opt(2019, 5, 1).unwrap();
//! assert_eq!(store.query_by_date_range(day, day).len(), 1);
//! assert_eq!(store.query_by_sender("Alice").len(), 1);
//! # Ok::<(), postcards::store::StoreError>(())
//! ```

pub mod engine;
pub mod error;
pub mod file;
pub mod parse;
pub mod types;

// Re-export commonly used types
pub use engine::PostcardStore;
pub use error::{RecordError, StoreError, StoreResult};
pub use parse::{parse_line, parse_text};
pub use types::{DateRange, Postcard, WriteMode};
