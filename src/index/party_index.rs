//! Party Index - name → positions
//!
//! One instance indexes senders, another receivers. Names are matched
//! exactly; they were already trimmed by the parser.

use crate::index::Position;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct PartyIndex {
    index: HashMap<String, Vec<Position>>,
}

impl PartyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `position` involves `name`
    ///
    /// Positions must be added in increasing order.
    pub fn add(&mut self, name: &str, position: Position) {
        match self.index.get_mut(name) {
            Some(positions) => positions.push(position),
            None => {
                self.index.insert(name.to_string(), vec![position]);
            }
        }
    }

    /// Positions for `name` in insertion order, empty if unknown
    pub fn find(&self, name: &str) -> &[Position] {
        self.index.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// All known names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.index.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of distinct names
    pub fn name_count(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn buckets(&self) -> impl Iterator<Item = (&String, &Vec<Position>)> {
        self.index.iter()
    }
}
