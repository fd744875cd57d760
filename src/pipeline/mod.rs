//! Pipeline entry points for harvester operations.
//!
//! - `run_harvest`: fetch, validate, deduplicate, and emit records for a
//!   list of discovered categories

pub mod harvest;

pub use harvest::{harvest_category, run_harvest, run_with_source};
