// src/config.rs

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP behavior settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Remote endpoint locations
    #[serde(default)]
    pub endpoints: EndpointConfig,

    /// Category discovery settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Pagination and deduplication policy
    #[serde(default)]
    pub harvest: HarvestConfig,

    /// Output sink settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.endpoints.base_url.trim().is_empty()
            || self.endpoints.index_url.trim().is_empty()
            || self.endpoints.query_url.trim().is_empty()
        {
            return Err(AppError::validation("endpoints must not be empty"));
        }
        if let (Some(start), Some(end)) = (self.discovery.id_start, self.discovery.id_end) {
            if start > end {
                return Err(AppError::validation(
                    "discovery.id_start must not exceed discovery.id_end",
                ));
            }
        }
        Ok(())
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Politeness delay between consecutive requests, in milliseconds
    #[serde(default = "defaults::delay")]
    pub delay_ms: u64,
}

impl FetchConfig {
    /// Politeness delay as a `Duration`.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            delay_ms: defaults::delay(),
        }
    }
}

/// Remote endpoint locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Site base, used to resolve relative links and detail pages
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Category index page with the `/category/{id}.html` links
    #[serde(default = "defaults::index_url")]
    pub index_url: String,

    /// Product query endpoint (structured source)
    #[serde(default = "defaults::query_url")]
    pub query_url: String,
}

impl EndpointConfig {
    /// Detail page URL for one catalog code.
    pub fn detail_url(&self, lcsc_code: &str) -> String {
        format!(
            "{}/product-detail/{}.html",
            self.base_url.trim_end_matches('/'),
            lcsc_code
        )
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            index_url: defaults::index_url(),
            query_url: defaults::query_url(),
        }
    }
}

/// Category discovery settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Inclusive lower bound on category ids (no bound when absent)
    #[serde(default)]
    pub id_start: Option<u32>,

    /// Inclusive upper bound on category ids (no bound when absent)
    #[serde(default)]
    pub id_end: Option<u32>,
}

impl DiscoveryConfig {
    /// Whether a category id passes the configured range filter.
    pub fn id_in_range(&self, id: u32) -> bool {
        if let Some(start) = self.id_start {
            if id < start {
                return false;
            }
        }
        if let Some(end) = self.id_end {
            if id > end {
                return false;
            }
        }
        true
    }
}

/// Pagination and deduplication policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Page source variant
    #[serde(default)]
    pub source: SourceKind,

    /// Cap on pages per category; 0 means no cap
    #[serde(default)]
    pub max_pages: u32,

    /// Scope within which the (mpn, lcsc_code) key must stay unique
    #[serde(default)]
    pub dedup_scope: DedupScope,
}

/// Which page source variant to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Structured query endpoint with pagination metadata
    #[default]
    Api,
    /// Rendered pages flattened to text, pattern-extracted
    Text,
}

impl FromStr for SourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "api" => Ok(Self::Api),
            "text" => Ok(Self::Text),
            other => Err(AppError::config(format!("unknown source kind: {other}"))),
        }
    }
}

/// Deduplication scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupScope {
    /// Fresh seen-key set per category; one table per category
    #[default]
    Category,
    /// One seen-key set for the whole run; one combined table
    Run,
}

impl FromStr for DedupScope {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "category" => Ok(Self::Category),
            "run" => Ok(Self::Run),
            other => Err(AppError::config(format!("unknown dedup scope: {other}"))),
        }
    }
}

/// Output sink settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one CSV table per harvest scope
    #[serde(default = "defaults::output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
         AppleWebKit/537.36 (KHTML, like Gecko) \
         Chrome/120.0 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        20
    }
    pub fn delay() -> u64 {
        1000
    }
    pub fn base_url() -> String {
        "https://www.lcsc.com".into()
    }
    pub fn index_url() -> String {
        "https://www.lcsc.com/products".into()
    }
    pub fn query_url() -> String {
        "https://wmsc.lcsc.com/ftps/wm/product/query/list".into()
    }
    pub fn output_dir() -> PathBuf {
        PathBuf::from("output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetch.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_id_range() {
        let mut config = Config::default();
        config.discovery.id_start = Some(100);
        config.discovery.id_end = Some(50);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_id_range_filter() {
        let discovery = DiscoveryConfig {
            id_start: Some(1201),
            id_end: Some(1400),
        };
        assert!(discovery.id_in_range(1201));
        assert!(discovery.id_in_range(1400));
        assert!(!discovery.id_in_range(1200));
        assert!(!discovery.id_in_range(1401));

        let open = DiscoveryConfig::default();
        assert!(open.id_in_range(1));
        assert!(open.id_in_range(u32::MAX));
    }

    #[test]
    fn test_source_kind_parsing() {
        assert_eq!("api".parse::<SourceKind>().unwrap(), SourceKind::Api);
        assert_eq!("TEXT".parse::<SourceKind>().unwrap(), SourceKind::Text);
        assert!("html".parse::<SourceKind>().is_err());
    }

    #[test]
    fn test_detail_url() {
        let endpoints = EndpointConfig::default();
        assert_eq!(
            endpoints.detail_url("C40912"),
            "https://www.lcsc.com/product-detail/C40912.html"
        );
    }

    #[test]
    fn test_harvest_section_parses_from_toml() {
        let config: Config = toml::from_str(
            r#"
            [harvest]
            source = "text"
            max_pages = 5
            dedup_scope = "run"
            "#,
        )
        .unwrap();
        assert_eq!(config.harvest.source, SourceKind::Text);
        assert_eq!(config.harvest.max_pages, 5);
        assert_eq!(config.harvest.dedup_scope, DedupScope::Run);
    }
}
