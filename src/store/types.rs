//! Core data types for the postcard store
//!
//! - `Postcard`: one record line plus the fields parsed out of it
//! - `DateRange`: an inclusive span of days for range queries
//! - `WriteMode`: how `save` treats an existing destination file

use chrono::NaiveDate;

/// A single postcard
///
/// The raw line is authoritative and is what gets written back on save.
/// `date`, `sender` and `receiver` exist only to feed the indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postcard {
    raw: String,
    date: NaiveDate,
    sender: String,
    receiver: String,
}

impl Postcard {
    pub(crate) fn new(
        raw: impl Into<String>,
        date: NaiveDate,
        sender: impl Into<String>,
        receiver: impl Into<String>,
    ) -> Self {
        Self {
            raw: raw.into(),
            date,
            sender: sender.into(),
            receiver: receiver.into(),
        }
    }

    /// The line exactly as it was read
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }
}

impl std::fmt::Display for Postcard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Inclusive range of calendar days
///
/// A range whose start lies after its end is valid but matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when no date can satisfy `start <= d <= end`
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// How `save` treats an existing destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Replace any existing content
    #[default]
    Overwrite,
    /// Keep existing content and add after it
    Append,
}

impl std::fmt::Display for WriteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteMode::Overwrite => write!(f, "overwrite"),
            WriteMode::Append => write!(f, "append"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_postcard_display_is_raw() {
        let card = Postcard::new(
            "date: 2019-05-01; from: Alice; to: Bob; Hello",
            date(2019, 5, 1),
            "Alice",
            "Bob",
        );
        assert_eq!(card.to_string(), card.raw());
        assert_eq!(card.sender(), "Alice");
        assert_eq!(card.receiver(), "Bob");
    }

    #[test]
    fn test_date_range_emptiness() {
        assert!(!DateRange::new(date(2019, 5, 1), date(2019, 5, 3)).is_empty());
        assert!(!DateRange::new(date(2019, 5, 2), date(2019, 5, 2)).is_empty());
        assert!(DateRange::new(date(2019, 5, 3), date(2019, 5, 1)).is_empty());
    }

    #[test]
    fn test_write_mode_default() {
        assert_eq!(WriteMode::default(), WriteMode::Overwrite);
        assert_eq!(WriteMode::Append.to_string(), "append");
    }
}
