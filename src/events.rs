// src/events.rs

//! Structured progress events.
//!
//! The pipeline narrates itself through `HarvestEvent`s handed to a
//! `Reporter`, so any logger (or a test) can consume progress without the
//! pipeline printing anything directly.

use crate::models::CategoryDescriptor;

/// One observable step of a harvest run.
#[derive(Debug, Clone)]
pub enum HarvestEvent {
    /// Work on a category began
    CategoryStarted {
        index: usize,
        total: usize,
        category: CategoryDescriptor,
    },

    /// One listing page was fetched and processed
    PageFetched {
        page: u32,
        matched: usize,
        fresh: usize,
        running_total: usize,
    },

    /// One listing page could not be fetched
    PageFailed { page: u32, reason: String },

    /// A candidate failed validation
    RecordRejected {
        page: u32,
        mpn: String,
        lcsc_code: String,
        reason: String,
    },

    /// Pagination ended early because a page yielded nothing new
    PaginationStopped { page: u32 },

    /// The category was abandoned after consecutive fetch failures
    CategoryAborted { id: u32, page: u32 },

    /// A category finished with records
    CategoryCompleted {
        id: u32,
        records: usize,
        pages: u32,
    },

    /// A category finished empty and was skipped
    CategorySkipped { id: u32, reason: String },

    /// One table was handed to the sink
    TableWritten { name: String, records: usize },
}

/// Consumer of harvest events.
pub trait Reporter {
    fn report(&self, event: &HarvestEvent);
}

/// Renders events through the `log` facade.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, event: &HarvestEvent) {
        match event {
            HarvestEvent::CategoryStarted {
                index,
                total,
                category,
            } => {
                log::info!(
                    "[{}/{}] Category {} ({}): {}",
                    index,
                    total,
                    category.id,
                    category.name,
                    category.url
                );
            }
            HarvestEvent::PageFetched {
                page,
                matched,
                fresh,
                running_total,
            } => {
                log::info!(
                    "Page {}: {} candidates, {} new (total so far: {})",
                    page,
                    matched,
                    fresh,
                    running_total
                );
            }
            HarvestEvent::PageFailed { page, reason } => {
                log::warn!("Page {} failed: {}", page, reason);
            }
            HarvestEvent::RecordRejected {
                page,
                mpn,
                lcsc_code,
                reason,
            } => {
                log::debug!(
                    "Rejected candidate on page {} (mpn={:?}, code={:?}): {}",
                    page,
                    mpn,
                    lcsc_code,
                    reason
                );
            }
            HarvestEvent::PaginationStopped { page } => {
                log::info!("Page {}: nothing new; stopping pagination", page);
            }
            HarvestEvent::CategoryAborted { id, page } => {
                log::warn!(
                    "Category {}: aborted at page {} after consecutive fetch failures",
                    id,
                    page
                );
            }
            HarvestEvent::CategoryCompleted { id, records, pages } => {
                log::info!(
                    "Category {}: {} records from {} page(s)",
                    id,
                    records,
                    pages
                );
            }
            HarvestEvent::CategorySkipped { id, reason } => {
                log::warn!("Category {}: skipped ({})", id, reason);
            }
            HarvestEvent::TableWritten { name, records } => {
                log::info!("Wrote {} records to table '{}'", records, name);
            }
        }
    }
}

/// Discards every event. Used by tests.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: &HarvestEvent) {}
}
