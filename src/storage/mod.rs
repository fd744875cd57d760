// src/storage/mod.rs

//! Output sinks for harvested tables.
//!
//! One table is emitted per harvest scope. Table names go through the same
//! sanitation workbook sheets need: forbidden characters replaced, length
//! capped, repeats deduplicated with a numeric suffix.

pub mod csv;

use std::collections::HashSet;

use crate::error::Result;
use crate::models::ProductRecord;

pub use csv::CsvDirSink;

/// Longest allowed table name.
const MAX_TABLE_NAME_LEN: usize = 31;

/// Stem length left for deduplication suffixes.
const DEDUP_STEM_LEN: usize = 28;

/// Metadata about one written table.
#[derive(Debug, Clone)]
pub struct TableSummary {
    /// Final (sanitized, deduplicated) table name
    pub name: String,
    /// Records written
    pub records: usize,
    /// Where the table landed (path, sheet, ...)
    pub location: String,
}

/// Receives one table per harvest scope.
pub trait RecordSink {
    /// Write one table.
    ///
    /// `base_name` is the preferred raw name; `fallback` is used when it is
    /// empty. The sink sanitizes and deduplicates the final name.
    fn write_table(
        &mut self,
        base_name: &str,
        fallback: &str,
        records: &[ProductRecord],
    ) -> Result<TableSummary>;
}

/// Pick the raw table name for a category's records.
///
/// Prefers the records' own child category, then subcategory, then
/// category, then the discovered menu name. May return an empty string;
/// the sink's fallback covers that.
pub fn table_base_name(records: &[ProductRecord], menu_name: &str) -> String {
    let levels: [fn(&ProductRecord) -> &str; 3] = [
        |r| r.child_category.as_str(),
        |r| r.subcategory.as_str(),
        |r| r.category.as_str(),
    ];
    for level in levels {
        if let Some(name) = records.iter().map(level).find(|name| !name.is_empty()) {
            return name.to_string();
        }
    }
    menu_name.trim().to_string()
}

/// Sanitizes and deduplicates table names across one sink.
#[derive(Debug, Default)]
pub struct TableNames {
    used: HashSet<String>,
}

impl TableNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce a unique, sanitized name from a raw candidate.
    pub fn assign(&mut self, raw: &str, fallback: &str) -> String {
        let mut picked = raw.trim();
        if picked.is_empty() {
            picked = fallback.trim();
        }
        if picked.is_empty() {
            picked = "Sheet";
        }

        let base = truncate_chars(&sanitize(picked), MAX_TABLE_NAME_LEN);

        let mut name = base.clone();
        let mut suffix = 1;
        while self.used.contains(&name) {
            let stem = truncate_chars(&base, DEDUP_STEM_LEN);
            name = format!("{stem}_{suffix}");
            suffix += 1;
        }

        self.used.insert(name.clone());
        name
    }
}

/// Replace characters workbook sheets forbid.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | '*' | '?' | ':' | '[' | ']' => '_',
            other => other,
        })
        .collect()
}

fn truncate_chars(name: &str, limit: usize) -> String {
    name.chars().take(limit).collect()
}
