//! Date Index - ordered map for date range queries
//!
//! Maps date → positions. Backed by a `BTreeMap` so a range walk yields
//! dates in ascending order; positions within one date stay in insertion
//! order.

use crate::index::Position;
use crate::store::DateRange;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct DateIndex {
    index: BTreeMap<NaiveDate, Vec<Position>>,
}

impl DateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `position` carries `date`
    ///
    /// Positions must be added in increasing order.
    pub fn add(&mut self, date: NaiveDate, position: Position) {
        self.index.entry(date).or_default().push(position);
    }

    /// Positions whose date lies in the range, grouped by ascending date
    pub fn find_range(&self, range: DateRange) -> Vec<Position> {
        // BTreeMap::range panics on an inverted range
        if range.is_empty() {
            return Vec::new();
        }

        self.index
            .range(range.start..=range.end)
            .flat_map(|(_, positions)| positions.iter().copied())
            .collect()
    }

    /// All indexed dates, ascending
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.index.keys().copied().collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.index.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.index.keys().next_back().copied()
    }

    /// Number of distinct dates
    pub fn date_count(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn buckets(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<Position>)> {
        self.index.iter()
    }
}
