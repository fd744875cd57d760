// src/services/mod.rs

//! Harvesting services: discovery, page sources, extraction, description
//! recovery, validation, and aggregation.

pub mod aggregate;
pub mod describe;
pub mod discovery;
pub mod extract;
pub mod source;
pub mod validate;

pub use aggregate::Aggregator;
pub use describe::{DescriptionResolver, clean_description};
pub use discovery::CategoryDiscoverer;
pub use extract::TextExtractor;
pub use source::{ApiSource, PageSource, TextSource, make_source};
pub use validate::{Rejection, Validator};
