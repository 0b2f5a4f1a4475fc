//! Index Manager - coordinates the three postcard indexes
//!
//! Every record pushed onto the record sequence is indexed here exactly
//! once, under its own date, sender and receiver. The manager never sees
//! a record that failed to parse, so indexing itself cannot fail.

use crate::index::{DateIndex, IndexStats, PartyIndex, Position};
use crate::store::{DateRange, Postcard};
use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct IndexManager {
    by_date: DateIndex,
    by_sender: PartyIndex,
    by_receiver: PartyIndex,
    /// Number of positions indexed so far
    indexed: usize,
}

impl IndexManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the record at `position`
    ///
    /// Positions must arrive as 0, 1, 2, ... with no gaps, matching the
    /// order records are pushed onto the sequence.
    pub fn add(&mut self, position: Position, postcard: &Postcard) {
        debug_assert_eq!(position, self.indexed, "positions must be indexed in order");

        self.by_date.add(postcard.date(), position);
        self.by_sender.add(postcard.sender(), position);
        self.by_receiver.add(postcard.receiver(), position);
        self.indexed += 1;
    }

    // ==================== Query Methods ====================

    /// Positions with a date in the range, ascending by date
    pub fn find_by_date_range(&self, range: DateRange) -> Vec<Position> {
        self.by_date.find_range(range)
    }

    /// Positions sent by `sender`, in insertion order
    pub fn find_by_sender(&self, sender: &str) -> &[Position] {
        self.by_sender.find(sender)
    }

    /// Positions addressed to `receiver`, in insertion order
    pub fn find_by_receiver(&self, receiver: &str) -> &[Position] {
        self.by_receiver.find(receiver)
    }

    // ==================== Introspection ====================

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.by_date.dates()
    }

    pub fn senders(&self) -> Vec<String> {
        self.by_sender.names()
    }

    pub fn receivers(&self) -> Vec<String> {
        self.by_receiver.names()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            records: self.indexed,
            dates: self.by_date.date_count(),
            senders: self.by_sender.name_count(),
            receivers: self.by_receiver.name_count(),
            first_date: self.by_date.first_date(),
            last_date: self.by_date.last_date(),
        }
    }

    /// Verify that every record sits in exactly one bucket of each index,
    /// under its own keys, and that no index refers to anything else
    pub fn check(&self, records: &[Postcard]) -> Result<(), String> {
        if self.indexed != records.len() {
            return Err(format!(
                "{} records but {} indexed positions",
                records.len(),
                self.indexed
            ));
        }

        let dates = self.by_date.buckets().map(|(k, v)| (k.to_string(), v));
        check_buckets("date", dates, records, |p| p.date().to_string())?;

        let senders = self.by_sender.buckets().map(|(k, v)| (k.clone(), v));
        check_buckets("sender", senders, records, |p| p.sender().to_string())?;

        let receivers = self.by_receiver.buckets().map(|(k, v)| (k.clone(), v));
        check_buckets("receiver", receivers, records, |p| p.receiver().to_string())?;

        Ok(())
    }
}

fn check_buckets<'a>(
    name: &str,
    buckets: impl Iterator<Item = (String, &'a Vec<Position>)>,
    records: &[Postcard],
    key_of: impl Fn(&Postcard) -> String,
) -> Result<(), String> {
    let mut seen = HashSet::new();

    for (key, positions) in buckets {
        if positions.windows(2).any(|w| w[0] >= w[1]) {
            return Err(format!("{} bucket {:?} is not in insertion order", name, key));
        }

        for &position in positions {
            let record = records.get(position).ok_or_else(|| {
                format!("{} bucket {:?} points past the end ({})", name, key, position)
            })?;

            if key_of(record) != key {
                return Err(format!(
                    "position {} filed under {} {:?} but has {:?}",
                    position,
                    name,
                    key,
                    key_of(record)
                ));
            }

            if !seen.insert(position) {
                return Err(format!("position {} appears twice in {} index", position, name));
            }
        }
    }

    if seen.len() != records.len() {
        return Err(format!(
            "{} index covers {} of {} records",
            name,
            seen.len(),
            records.len()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::parse::parse_line;

    fn cards() -> Vec<Postcard> {
        [
            "date: 2019-05-01; from: Alice; to: Bob; Hello",
            "date: 2019-05-03; from: Carol; to: Bob; Hi there",
            "date: 2019-05-01; from: Bob; to: Alice; Reply",
        ]
        .iter()
        .map(|line| parse_line(line).unwrap())
        .collect()
    }

    fn indexed(records: &[Postcard]) -> IndexManager {
        let mut manager = IndexManager::new();
        for (position, card) in records.iter().enumerate() {
            manager.add(position, card);
        }
        manager
    }

    #[test]
    fn test_find_by_each_index() {
        let records = cards();
        let manager = indexed(&records);

        assert_eq!(manager.find_by_sender("Bob"), &[2]);
        assert_eq!(manager.find_by_receiver("Bob"), &[0, 1]);
        assert!(manager.find_by_receiver("Carol").is_empty());

        let may_first = NaiveDate::from_ymd_opt(2019, 5, 1).unwrap();
        assert_eq!(
            manager.find_by_date_range(DateRange::new(may_first, may_first)),
            vec![0, 2]
        );
    }

    #[test]
    fn test_stats() {
        let records = cards();
        let stats = indexed(&records).stats();

        assert_eq!(stats.records, 3);
        assert_eq!(stats.dates, 2);
        assert_eq!(stats.senders, 3);
        assert_eq!(stats.receivers, 2);
        assert_eq!(stats.first_date, NaiveDate::from_ymd_opt(2019, 5, 1));
        assert_eq!(stats.last_date, NaiveDate::from_ymd_opt(2019, 5, 3));
    }

    #[test]
    fn test_check_passes_for_consistent_indexes() {
        let records = cards();
        let manager = indexed(&records);
        assert_eq!(manager.check(&records), Ok(()));
    }

    #[test]
    fn test_check_detects_missing_records() {
        let records = cards();
        let manager = indexed(&records[..2]);
        assert!(manager.check(&records).is_err());
    }

    #[test]
    fn test_check_detects_misfiled_record() {
        let records = cards();
        let mut manager = IndexManager::new();
        manager.add(0, &records[0]);
        manager.add(1, &records[1]);
        // Position 2 filed with the fields of record 0
        manager.add(2, &records[0]);

        assert!(manager.check(&records).is_err());
    }

    #[test]
    fn test_introspection_lists() {
        let records = cards();
        let manager = indexed(&records);

        assert_eq!(manager.senders(), vec!["Alice", "Bob", "Carol"]);
        assert_eq!(manager.receivers(), vec!["Alice", "Bob"]);
        assert_eq!(manager.dates().len(), 2);
    }
}
