//! Raw page result shared by both page sources.

use crate::models::ProductRecord;

/// One fetched page of candidate records.
///
/// `total_pages` is only reported by the structured query source; the text
/// source never knows it and the caller infers termination from yields.
#[derive(Debug, Default)]
pub struct RawPage {
    /// Extracted candidate records, not yet validated
    pub candidates: Vec<ProductRecord>,

    /// Total page count reported by the source, if any
    pub total_pages: Option<u32>,
}

impl RawPage {
    /// An empty page, used as the soft-failure result.
    pub fn empty(total_pages: Option<u32>) -> Self {
        Self {
            candidates: Vec::new(),
            total_pages,
        }
    }
}
