// src/services/discovery.rs

//! Category discovery from the index page.

use std::collections::HashSet;

use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::config::{DiscoveryConfig, EndpointConfig};
use crate::error::Result;
use crate::models::CategoryDescriptor;
use crate::utils::{http, url};

/// Discovers category links on the catalog index page.
pub struct CategoryDiscoverer {
    client: Client,
    endpoints: EndpointConfig,
    filter: DiscoveryConfig,
}

impl CategoryDiscoverer {
    pub fn new(client: Client, endpoints: EndpointConfig, filter: DiscoveryConfig) -> Self {
        Self {
            client,
            endpoints,
            filter,
        }
    }

    /// Fetch the index page and collect category descriptors.
    ///
    /// A failed index fetch yields an empty list; the caller decides whether
    /// that is terminal.
    pub fn discover(&self) -> Result<Vec<CategoryDescriptor>> {
        let html = match http::fetch_text(&self.client, &self.endpoints.index_url) {
            Ok(html) => html,
            Err(e) => {
                log::warn!(
                    "Could not fetch category index {}: {}",
                    self.endpoints.index_url,
                    e
                );
                return Ok(Vec::new());
            }
        };

        let categories = parse_index(&html, &self.endpoints.base_url, &self.filter);
        log::info!(
            "Discovered {} category URLs from {}",
            categories.len(),
            self.endpoints.index_url
        );
        Ok(categories)
    }
}

/// Collect category links from index markup, in document order.
///
/// Keeps hrefs carrying a `/category/{id}.html` id inside the configured
/// range, skips empty names and generic "View All" menu entries, and keeps
/// the first name seen per id.
pub fn parse_index(
    html: &str,
    base_url: &str,
    filter: &DiscoveryConfig,
) -> Vec<CategoryDescriptor> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").expect("anchor selector is valid");

    let mut seen: HashSet<u32> = HashSet::new();
    let mut categories = Vec::new();

    for element in document.select(&anchors) {
        let href = element.value().attr("href").unwrap_or("");
        let Some(id) = url::parse_category_id(href) else {
            continue;
        };
        if !filter.id_in_range(id) {
            continue;
        }

        let name = element.text().collect::<String>().trim().to_string();
        if name.is_empty() || name.contains("View All") {
            continue;
        }

        if !seen.insert(id) {
            continue;
        }

        categories.push(CategoryDescriptor {
            id,
            url: url::resolve(base_url, href),
            name,
        });
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
        <html><body>
            <a href="/category/874.html">Single FETs, MOSFETs</a>
            <a href="/category/874.html">MOSFETs (duplicate)</a>
            <a href="/category/875.html">View All Transistors</a>
            <a href="/category/876.html">   </a>
            <a href="/category/877.html">Diodes</a>
            <a href="https://www.lcsc.com/category/1500.html">Resistors</a>
            <a href="/products">All products</a>
        </body></html>
    "#;

    fn open_filter() -> DiscoveryConfig {
        DiscoveryConfig::default()
    }

    #[test]
    fn test_parse_index_dedupes_and_filters() {
        let categories = parse_index(INDEX, "https://www.lcsc.com", &open_filter());
        let ids: Vec<u32> = categories.iter().map(|c| c.id).collect();
        // 875 dropped (View All), 876 dropped (empty name), 874 kept once
        assert_eq!(ids, vec![874, 877, 1500]);
        assert_eq!(categories[0].name, "Single FETs, MOSFETs");
        assert_eq!(
            categories[0].url,
            "https://www.lcsc.com/category/874.html"
        );
    }

    #[test]
    fn test_parse_index_honors_id_range() {
        let filter = DiscoveryConfig {
            id_start: Some(870),
            id_end: Some(900),
        };
        let categories = parse_index(INDEX, "https://www.lcsc.com", &filter);
        let ids: Vec<u32> = categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![874, 877]);
    }

    #[test]
    fn test_parse_index_keeps_absolute_urls() {
        let categories = parse_index(INDEX, "https://www.lcsc.com", &open_filter());
        let resistors = categories.iter().find(|c| c.id == 1500).unwrap();
        assert_eq!(resistors.url, "https://www.lcsc.com/category/1500.html");
    }
}
