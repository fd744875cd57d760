// src/services/source.rs

//! Page sources: one trait, two interchangeable variants.
//!
//! `ApiSource` posts to the structured query endpoint and knows the total
//! page count; `TextSource` fetches rendered pages and pattern-extracts
//! their flattened text, so termination must be inferred by the caller.

use reqwest::blocking::Client;

use crate::config::{EndpointConfig, SourceKind};
use crate::error::Result;
use crate::models::{CategoryDescriptor, QueryRequest, QueryResponse, RawPage};
use crate::services::extract::{self, TextExtractor};
use crate::utils::{html, http, url};

/// Retrieves one page of candidate records for one category.
pub trait PageSource {
    /// Fetch and extract one page.
    ///
    /// `Err` means the page was unfetchable and counts toward the
    /// text-source consecutive-failure rule; sources whose failures are
    /// soft return an empty page instead.
    fn fetch_page(&self, category: &CategoryDescriptor, page: u32) -> Result<RawPage>;
}

/// Build the configured source variant.
pub fn make_source(
    kind: SourceKind,
    client: &Client,
    endpoints: &EndpointConfig,
) -> Box<dyn PageSource> {
    match kind {
        SourceKind::Api => Box::new(ApiSource::new(client.clone(), &endpoints.query_url)),
        SourceKind::Text => Box::new(TextSource::new(client.clone())),
    }
}

/// Structured query source.
///
/// Transport, status, and decode failures are all soft: the page comes
/// back empty and the harvest continues.
pub struct ApiSource {
    client: Client,
    query_url: String,
}

impl ApiSource {
    pub fn new(client: Client, query_url: impl Into<String>) -> Self {
        Self {
            client,
            query_url: query_url.into(),
        }
    }
}

impl PageSource for ApiSource {
    fn fetch_page(&self, category: &CategoryDescriptor, page: u32) -> Result<RawPage> {
        log::debug!("Querying page {} for catalog {}", page, category.id);

        let request = QueryRequest::for_page(category.id, page);
        let response = match self
            .client
            .post(&self.query_url)
            .json(&request)
            .send()
            .and_then(|r| r.error_for_status())
        {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Query failed for page {}: {}", page, e);
                return Ok(RawPage::empty(None));
            }
        };

        let envelope: QueryResponse = match response.json() {
            Ok(envelope) => envelope,
            Err(e) => {
                log::warn!("Failed to decode query response for page {}: {}", page, e);
                return Ok(RawPage::empty(None));
            }
        };

        let result = envelope.result.unwrap_or_default();
        let total_pages = Some(result.total_page.unwrap_or(1).max(1));
        let candidates = result
            .data_list
            .unwrap_or_default()
            .iter()
            .map(|item| extract::from_api_item(item, page))
            .collect();

        Ok(RawPage {
            candidates,
            total_pages,
        })
    }
}

/// Rendered-page text source.
///
/// Carries no pagination metadata; fetch failures propagate so the caller
/// can apply the consecutive-failure rule.
pub struct TextSource {
    client: Client,
    extractor: TextExtractor,
}

impl TextSource {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            extractor: TextExtractor::new(),
        }
    }
}

impl PageSource for TextSource {
    fn fetch_page(&self, category: &CategoryDescriptor, page: u32) -> Result<RawPage> {
        let page_url = url::build_page_url(&category.url, page);
        log::debug!("Fetching {}", page_url);

        let body = http::fetch_text(&self.client, &page_url)?;
        let text = html::flatten(&body);

        Ok(RawPage {
            candidates: self.extractor.extract(&text, page),
            total_pages: None,
        })
    }
}
