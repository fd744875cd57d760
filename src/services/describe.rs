// src/services/describe.rs

//! Description cleaning and multi-layer recovery.
//!
//! Listing descriptions arrive noisy (prices, stock counts, runaway
//! captures). `clean_description` normalizes them; `DescriptionResolver`
//! fills records whose primary source yielded nothing by fetching the
//! per-record detail page.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::blocking::Client;

use crate::config::EndpointConfig;
use crate::models::ProductRecord;
use crate::utils::http::{self, Pacer};
use crate::utils::html;

/// Longest description kept before truncating at a word boundary.
const MAX_DESCRIPTION_LEN: usize = 200;

fn tail_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // trailing price clauses
            r"\s*\$[\d,.]+.*$",
            r"\s*US\$[\d,.]+.*$",
            // trailing piece-count clauses
            r"\s+\d+\s*pcs.*$",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("tail pattern is valid"))
        .collect()
    })
}

fn detail_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"Description\s+(.+?)(?:\s+Datasheet|\s+##\s+Products\s+Specifications|\s+Type\s+Description|$)",
        )
        .expect("detail pattern is valid")
    })
}

/// Clean and normalize description text.
pub fn clean_description(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut desc = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    for pattern in tail_patterns() {
        desc = pattern.replace(&desc, "").into_owned();
    }

    if desc.chars().count() > MAX_DESCRIPTION_LEN {
        let prefix: String = desc.chars().take(MAX_DESCRIPTION_LEN).collect();
        let cut = match prefix.rfind(' ') {
            Some(idx) => prefix[..idx].to_string(),
            None => prefix,
        };
        desc = format!("{cut}...");
    }

    desc.trim().to_string()
}

/// Extract the description span from flattened detail-page text.
///
/// Captures between the "Description" label and the first terminator
/// (Datasheet label, specifications-section marker, or end of text).
pub fn extract_detail_description(text: &str) -> String {
    match detail_pattern().captures(text) {
        Some(caps) => clean_description(caps.get(1).map_or("", |m| m.as_str())),
        None => String::new(),
    }
}

/// Fills empty descriptions from per-record detail pages.
pub struct DescriptionResolver {
    client: Client,
    endpoints: EndpointConfig,
}

impl DescriptionResolver {
    pub fn new(client: Client, endpoints: EndpointConfig) -> Self {
        Self { client, endpoints }
    }

    /// Fill `record.description` from its detail page when empty.
    ///
    /// Issues at most one extra request per record, paced through the same
    /// pacer as page fetches. Failures leave the description empty.
    pub fn resolve(&self, record: &mut ProductRecord, pacer: &Pacer) {
        if !record.description.is_empty() || record.lcsc_code.is_empty() {
            return;
        }

        let detail_url = self.endpoints.detail_url(&record.lcsc_code);
        pacer.pace();

        let body = match http::fetch_text(&self.client, &detail_url) {
            Ok(body) => body,
            Err(e) => {
                log::warn!("Detail fetch failed for {}: {}", record.lcsc_code, e);
                return;
            }
        };

        record.description = extract_detail_description(&html::flatten(&body));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(
            clean_description("  Dual   N-Channel\tMOSFET  "),
            "Dual N-Channel MOSFET"
        );
    }

    #[test]
    fn test_clean_strips_price_tail() {
        assert_eq!(
            clean_description("30V N-Channel MOSFET $0.1228 / 5+ $0.09"),
            "30V N-Channel MOSFET"
        );
    }

    #[test]
    fn test_clean_strips_piece_count_tail() {
        assert_eq!(
            clean_description("Chip Resistor 100 pcs per reel"),
            "Chip Resistor"
        );
    }

    #[test]
    fn test_clean_empty() {
        assert_eq!(clean_description(""), "");
    }

    #[test]
    fn test_clean_truncates_at_word_boundary() {
        let word = "word ";
        let long = word.repeat(50); // 250 chars
        let cleaned = clean_description(&long);
        assert!(cleaned.ends_with("..."));
        let body = cleaned.trim_end_matches("...");
        assert!(body.chars().count() <= MAX_DESCRIPTION_LEN);
        assert!(!body.ends_with(' '));
        assert!(body.ends_with("word"));
    }

    #[test]
    fn test_clean_truncates_unbroken_text() {
        let long = "x".repeat(300);
        let cleaned = clean_description(&long);
        assert_eq!(cleaned.chars().count(), MAX_DESCRIPTION_LEN + 3);
    }

    #[test]
    fn test_detail_extraction_stops_at_datasheet() {
        let text = "Overview Description Dual N-Channel MOSFET, 30V Datasheet PDF";
        assert_eq!(
            extract_detail_description(text),
            "Dual N-Channel MOSFET, 30V"
        );
    }

    #[test]
    fn test_detail_extraction_stops_at_specs_marker() {
        let text = "Description 100nF 50V X7R ## Products Specifications Capacitance 100nF";
        assert_eq!(extract_detail_description(text), "100nF 50V X7R");
    }

    #[test]
    fn test_detail_extraction_runs_to_end_of_text() {
        assert_eq!(
            extract_detail_description("Description 1k Ohm chip resistor"),
            "1k Ohm chip resistor"
        );
    }

    #[test]
    fn test_detail_extraction_missing_label() {
        assert_eq!(extract_detail_description("no label here"), "");
    }
}
