//! Product record data structure.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single harvested product.
///
/// Produced as a candidate by the extractors, then validated and
/// deduplicated before it may be emitted to a sink.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductRecord {
    /// Manufacturer part number
    pub mpn: String,

    /// Vendor catalog code (`C` + 4 or more digits)
    pub lcsc_code: String,

    /// Manufacturer / brand name
    pub manufacturer: String,

    /// Cleaned description (at most 200 characters plus ellipsis)
    pub description: String,

    /// Top-level catalog name
    pub category: String,

    /// Second-level catalog name
    pub subcategory: String,

    /// Third-level catalog name
    pub child_category: String,

    /// Specification name/value pairs (reserved keys: Category,
    /// Manufacturer, Package)
    pub specs: BTreeMap<String, String>,

    /// Listing page the record was found on
    pub page: u32,
}

impl ProductRecord {
    /// Deduplication key, unique within one harvest scope.
    pub fn key(&self) -> (String, String) {
        (self.mpn.clone(), self.lcsc_code.clone())
    }

    /// Specs serialized as a single JSON column value.
    pub fn specs_json(&self) -> String {
        serde_json::to_string(&self.specs).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_pairs_mpn_and_code() {
        let record = ProductRecord {
            mpn: "BSS138-7-F".to_string(),
            lcsc_code: "C40912".to_string(),
            ..ProductRecord::default()
        };
        assert_eq!(
            record.key(),
            ("BSS138-7-F".to_string(), "C40912".to_string())
        );
    }

    #[test]
    fn test_specs_json_round_trips_keys() {
        let mut record = ProductRecord::default();
        record
            .specs
            .insert("Package".to_string(), "SOT-23".to_string());
        assert_eq!(record.specs_json(), r#"{"Package":"SOT-23"}"#);
    }
}
