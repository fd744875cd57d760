// src/utils/html.rs

//! Markup flattening for text-pattern extraction.

use scraper::Html;

/// Strip markup down to a flat text blob.
///
/// Text nodes are joined with single spaces so row patterns can match
/// across element boundaries.
pub fn flatten(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
}
