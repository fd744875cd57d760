// src/services/aggregate.rs

//! Scope-bounded deduplicating aggregation.
//!
//! One aggregator instance covers exactly one harvest scope (a category, or
//! the whole run, per `DedupScope`); the orchestrator creates instances at
//! scope boundaries.

use std::collections::HashSet;

use crate::models::ProductRecord;

/// Accumulates validated records, dropping repeated (mpn, lcsc_code) keys.
///
/// First occurrence wins; insertion order is preserved for output.
#[derive(Debug, Default)]
pub struct Aggregator {
    seen: HashSet<(String, String)>,
    records: Vec<ProductRecord>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a key was already accepted in this scope.
    pub fn contains(&self, key: &(String, String)) -> bool {
        self.seen.contains(key)
    }

    /// Accept a record unless its key repeats. Returns whether it was kept.
    pub fn insert(&mut self, record: ProductRecord) -> bool {
        if !self.seen.insert(record.key()) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Accepted records in insertion order.
    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    /// Consume the scope and take its records.
    pub fn into_records(self) -> Vec<ProductRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mpn: &str, code: &str) -> ProductRecord {
        ProductRecord {
            mpn: mpn.to_string(),
            lcsc_code: code.to_string(),
            manufacturer: "ACME".to_string(),
            ..ProductRecord::default()
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut aggregator = Aggregator::new();
        let mut first = record("BSS138", "C40912");
        first.description = "kept".to_string();
        let mut repeat = record("BSS138", "C40912");
        repeat.description = "dropped".to_string();

        assert!(aggregator.insert(first));
        assert!(!aggregator.insert(repeat));
        assert_eq!(aggregator.len(), 1);
        assert_eq!(aggregator.records()[0].description, "kept");
    }

    #[test]
    fn test_same_mpn_different_code_kept() {
        let mut aggregator = Aggregator::new();
        assert!(aggregator.insert(record("BSS138", "C40912")));
        assert!(aggregator.insert(record("BSS138", "C99999")));
        assert_eq!(aggregator.len(), 2);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut aggregator = Aggregator::new();
        aggregator.insert(record("A1", "C10000"));
        aggregator.insert(record("B2", "C20000"));
        aggregator.insert(record("C3", "C30000"));
        let mpns: Vec<String> = aggregator
            .into_records()
            .into_iter()
            .map(|r| r.mpn)
            .collect();
        assert_eq!(mpns, vec!["A1", "B2", "C3"]);
    }
}
