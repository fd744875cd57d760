// src/error.rs

//! Unified error handling for the harvester.

use std::fmt;

use thiserror::Error;

/// Result type alias for harvester operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Category URL carries no parseable catalog id
    #[error("No catalog id in category URL: {0}")]
    CategoryId(String),

    /// Index page yielded no category links
    #[error("No categories discovered at {0}")]
    NoCategories(String),

    /// A full run produced zero validated records
    #[error("No records harvested")]
    NoRecords,

    /// Harvest error with context
    #[error("Harvest error for {context}: {message}")]
    Harvest { context: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a harvest error with context.
    pub fn harvest(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Harvest {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
