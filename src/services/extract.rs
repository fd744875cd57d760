// src/services/extract.rs

//! Candidate record extraction for both page sources.
//!
//! The structured path maps query items field by field; the text path runs
//! one row pattern over flattened page text. Both yield the same
//! `ProductRecord` shape.

use std::collections::BTreeMap;

use regex::Regex;

use crate::models::{ApiProduct, ProductRecord};
use crate::services::describe::clean_description;

/// Row pattern for flattened listing text.
///
/// Captures, in order: MPN, catalog code, manufacturer, and a non-greedy
/// description ending at a price, a pipe, or end of line. Promotional
/// labels and stock phrases between the fields are skipped.
const TEXT_ROW_PATTERN: &str = concat!(
    r"(?m)\b([A-Z0-9][A-Z0-9\-.,/]+)\s+",
    r"(C\d{4,})\s+",
    r"(?:Hot|Lightning)?\s*",
    r"([A-Za-z0-9/]+)\s+",
    r"(?:[\d,]+\s+(?:In\s+)?Stock\s+)?",
    r"([^|$\n]+?)?",
    r"(?:\s+\$|\s+US\$|\s+\||$)",
);

/// Extracts candidate records from flattened listing text.
pub struct TextExtractor {
    pattern: Regex,
}

impl TextExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(TEXT_ROW_PATTERN).expect("text row pattern is valid"),
        }
    }

    /// Run the row pattern over one page of flattened text.
    ///
    /// Text rows carry no category hierarchy and no specs.
    pub fn extract(&self, text: &str, page: u32) -> Vec<ProductRecord> {
        self.pattern
            .captures_iter(text)
            .map(|caps| {
                let raw_description = caps.get(4).map_or("", |m| m.as_str());
                ProductRecord {
                    mpn: caps[1].trim().to_string(),
                    lcsc_code: caps[2].trim().to_string(),
                    manufacturer: caps[3].trim().to_string(),
                    description: clean_description(raw_description),
                    page,
                    ..ProductRecord::default()
                }
            })
            .collect()
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Map one structured query item to a candidate record.
pub fn from_api_item(item: &ApiProduct, page: u32) -> ProductRecord {
    let raw_description = first_filled(&[&item.product_intro_en, &item.product_name_en]);

    ProductRecord {
        mpn: trimmed(&item.product_model),
        lcsc_code: trimmed(&item.product_code),
        manufacturer: trimmed(&item.brand_name_en),
        description: clean_description(&raw_description),
        category: trimmed(&item.first_wm_catalog_name_en),
        subcategory: trimmed(&item.second_wm_catalog_name_en),
        child_category: trimmed(&item.third_wm_catalog_name_en),
        specs: build_specs(item),
        page,
    }
}

/// Build the specs map for one structured item.
///
/// Reserved keys (Category, Manufacturer, Package) are seeded first and
/// never overwritten by `paramVOList` entries; blank names and values are
/// skipped.
pub fn build_specs(item: &ApiProduct) -> BTreeMap<String, String> {
    let mut specs = BTreeMap::new();

    let category = first_filled(&[
        &item.wm_catalog_name_en,
        &item.first_wm_catalog_name_en,
        &item.second_wm_catalog_name_en,
        &item.third_wm_catalog_name_en,
    ]);
    if !category.is_empty() {
        specs.insert("Category".to_string(), category);
    }

    let manufacturer = trimmed(&item.brand_name_en);
    if !manufacturer.is_empty() {
        specs.insert("Manufacturer".to_string(), manufacturer);
    }

    let package = first_filled(&[
        &item.encap_standard,
        &item.encap_en,
        &item.encap,
        &item.package_en,
    ]);
    if !package.is_empty() {
        specs.insert("Package".to_string(), package);
    }

    for param in item.param_vo_list.as_deref().unwrap_or(&[]) {
        let name = first_filled(&[&param.param_name_en, &param.param_name]);
        let value = first_filled(&[&param.param_value_en, &param.param_value]);
        if name.is_empty() || value.is_empty() {
            continue;
        }
        specs.entry(name).or_insert(value);
    }

    specs
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_string()
}

fn first_filled(values: &[&Option<String>]) -> String {
    for value in values {
        let text = value.as_deref().unwrap_or("").trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_row_with_stock_and_price() {
        let extractor = TextExtractor::new();
        let text = "BSS138-7-F C40912 Hot DIODES 119,020 In Stock 60V 300mA \
                    Dual N-Channel MOSFET $0.1228";
        let records = extractor.extract(text, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mpn, "BSS138-7-F");
        assert_eq!(records[0].lcsc_code, "C40912");
        assert_eq!(records[0].manufacturer, "DIODES");
        assert_eq!(records[0].description, "60V 300mA Dual N-Channel MOSFET");
        assert_eq!(records[0].page, 1);
    }

    #[test]
    fn test_text_row_without_labels() {
        let extractor = TextExtractor::new();
        let text = "2N7002 C8545 onsemi N-Channel 60V MOSFET | next";
        let records = extractor.extract(text, 2);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].manufacturer, "onsemi");
        assert_eq!(records[0].description, "N-Channel 60V MOSFET");
    }

    #[test]
    fn test_text_rows_stop_at_line_end() {
        let extractor = TextExtractor::new();
        let text = "AO3400A C20917 AOS 30V N-Channel MOSFET\nIRFZ44N C2060 Infineon 55A MOSFET";
        let records = extractor.extract(text, 1);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description, "30V N-Channel MOSFET");
        assert_eq!(records[1].description, "55A MOSFET");
    }

    fn sample_item() -> ApiProduct {
        serde_json::from_str(
            r#"{
                "productModel": " BSS138-7-F ",
                "productCode": "C40912",
                "brandNameEn": "DIODES",
                "productIntroEn": "",
                "productNameEn": "Dual N-Channel MOSFET, 30V",
                "firstWmCatalogNameEn": "Transistors",
                "secondWmCatalogNameEn": "MOSFETs",
                "thirdWmCatalogNameEn": "Single FETs",
                "encapStandard": "SOT-23",
                "paramVOList": [
                    {"paramNameEn": "Vds", "paramValueEn": "30V"},
                    {"paramNameEn": "", "paramValueEn": "ignored"},
                    {"paramNameEn": "Blank", "paramValueEn": "  "},
                    {"paramNameEn": "Package", "paramValueEn": "DIP-8"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_api_item_field_mapping() {
        let record = from_api_item(&sample_item(), 3);
        assert_eq!(record.mpn, "BSS138-7-F");
        assert_eq!(record.lcsc_code, "C40912");
        assert_eq!(record.manufacturer, "DIODES");
        // intro is empty, falls back to the name field
        assert_eq!(record.description, "Dual N-Channel MOSFET, 30V");
        assert_eq!(record.category, "Transistors");
        assert_eq!(record.subcategory, "MOSFETs");
        assert_eq!(record.child_category, "Single FETs");
        assert_eq!(record.page, 3);
    }

    #[test]
    fn test_specs_reserved_keys_win() {
        let specs = build_specs(&sample_item());
        assert_eq!(specs.get("Category").map(String::as_str), Some("Transistors"));
        assert_eq!(
            specs.get("Manufacturer").map(String::as_str),
            Some("DIODES")
        );
        // encapStandard wins; the paramVOList "Package" entry is ignored
        assert_eq!(specs.get("Package").map(String::as_str), Some("SOT-23"));
        assert_eq!(specs.get("Vds").map(String::as_str), Some("30V"));
        assert!(!specs.contains_key("Blank"));
        assert!(!specs.contains_key(""));
    }
}
