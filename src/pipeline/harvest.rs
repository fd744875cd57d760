// src/pipeline/harvest.rs

//! Harvest orchestration.
//!
//! Drives per-category pagination over a `PageSource`, applies the
//! stopping rules, and hands completed scopes to the sink. Strictly
//! sequential: one request in flight at a time, pages in increasing
//! order, categories in discovery order.

use chrono::Utc;

use crate::config::{Config, DedupScope};
use crate::error::{AppError, Result};
use crate::events::{HarvestEvent, Reporter};
use crate::models::{CategoryDescriptor, HarvestStats};
use crate::services::source::make_source;
use crate::services::{Aggregator, DescriptionResolver, PageSource, Validator};
use crate::storage::{RecordSink, table_base_name};
use crate::utils::http::{self, Pacer};

/// Unfetchable pages in a row before a category is abandoned.
const MAX_CONSECUTIVE_FAILURES: u32 = 2;

/// Run a full harvest over the given categories.
///
/// Builds the configured page source and description resolver, then
/// delegates to [`run_with_source`].
pub fn run_harvest(
    config: &Config,
    categories: &[CategoryDescriptor],
    reporter: &dyn Reporter,
    sink: &mut dyn RecordSink,
) -> Result<HarvestStats> {
    let client = http::create_client(&config.fetch)?;
    let source = make_source(config.harvest.source, &client, &config.endpoints);
    let resolver = DescriptionResolver::new(client, config.endpoints.clone());
    run_with_source(config, categories, source.as_ref(), &resolver, reporter, sink)
}

/// Run a harvest with explicit collaborators.
///
/// A category that fails or yields nothing is skipped; it never aborts the
/// run. Zero categories and zero records overall are explicit errors.
pub fn run_with_source(
    config: &Config,
    categories: &[CategoryDescriptor],
    source: &dyn PageSource,
    resolver: &DescriptionResolver,
    reporter: &dyn Reporter,
    sink: &mut dyn RecordSink,
) -> Result<HarvestStats> {
    if categories.is_empty() {
        return Err(AppError::NoCategories(config.endpoints.index_url.clone()));
    }

    let start_time = Utc::now();
    let validator = Validator::new();
    let pacer = Pacer::new(config.fetch.delay());
    let scope = config.harvest.dedup_scope;

    let mut record_count = 0;
    let mut tables_written = 0;

    // Run scope shares one seen-key set and emits one combined table.
    let mut run_aggregator = Aggregator::new();

    for (index, category) in categories.iter().enumerate() {
        reporter.report(&HarvestEvent::CategoryStarted {
            index: index + 1,
            total: categories.len(),
            category: category.clone(),
        });

        pacer.reset();

        match scope {
            DedupScope::Category => {
                let mut aggregator = Aggregator::new();
                let pages = harvest_category(
                    source,
                    resolver,
                    &validator,
                    &mut aggregator,
                    config.harvest.max_pages,
                    category,
                    &pacer,
                    reporter,
                );

                if aggregator.is_empty() {
                    reporter.report(&HarvestEvent::CategorySkipped {
                        id: category.id,
                        reason: "no validated records".to_string(),
                    });
                    continue;
                }

                reporter.report(&HarvestEvent::CategoryCompleted {
                    id: category.id,
                    records: aggregator.len(),
                    pages,
                });

                let base = table_base_name(aggregator.records(), &category.name);
                let summary = sink.write_table(
                    &base,
                    &category.fallback_table_name(),
                    aggregator.records(),
                )?;
                reporter.report(&HarvestEvent::TableWritten {
                    name: summary.name,
                    records: summary.records,
                });

                record_count += aggregator.len();
                tables_written += 1;
            }
            DedupScope::Run => {
                let before = run_aggregator.len();
                let pages = harvest_category(
                    source,
                    resolver,
                    &validator,
                    &mut run_aggregator,
                    config.harvest.max_pages,
                    category,
                    &pacer,
                    reporter,
                );

                let added = run_aggregator.len() - before;
                if added == 0 {
                    reporter.report(&HarvestEvent::CategorySkipped {
                        id: category.id,
                        reason: "no new validated records".to_string(),
                    });
                } else {
                    reporter.report(&HarvestEvent::CategoryCompleted {
                        id: category.id,
                        records: added,
                        pages,
                    });
                }
            }
        }
    }

    if scope == DedupScope::Run && !run_aggregator.is_empty() {
        let base = table_base_name(run_aggregator.records(), "");
        let summary = sink.write_table(&base, "all_categories", run_aggregator.records())?;
        reporter.report(&HarvestEvent::TableWritten {
            name: summary.name,
            records: summary.records,
        });

        record_count = run_aggregator.len();
        tables_written = 1;
    }

    if record_count == 0 {
        return Err(AppError::NoRecords);
    }

    Ok(HarvestStats {
        start_time,
        end_time: Utc::now(),
        category_count: categories.len(),
        record_count,
        tables_written,
    })
}

/// Paginate one category into the given aggregator.
///
/// Returns the number of pages actually fetched. Termination:
/// - the page budget runs out (`min(cap, total_pages)` when the source
///   reports a total; the cap alone otherwise, open-ended without one);
/// - a fetched page contributes zero new validated records;
/// - two consecutive unfetchable pages (text source failures propagate,
///   structured-source failures are already soft empty pages).
#[allow(clippy::too_many_arguments)]
pub fn harvest_category(
    source: &dyn PageSource,
    resolver: &DescriptionResolver,
    validator: &Validator,
    aggregator: &mut Aggregator,
    max_pages: u32,
    category: &CategoryDescriptor,
    pacer: &Pacer,
    reporter: &dyn Reporter,
) -> u32 {
    let mut planned: Option<u32> = None;
    let mut pages_fetched = 0;
    let mut failures = 0;
    let mut page: u32 = 1;

    loop {
        match planned {
            Some(limit) if page > limit => break,
            None if max_pages > 0 && page > max_pages => break,
            _ => {}
        }

        pacer.pace();
        let raw = match source.fetch_page(category, page) {
            Ok(raw) => {
                failures = 0;
                raw
            }
            Err(e) => {
                failures += 1;
                reporter.report(&HarvestEvent::PageFailed {
                    page,
                    reason: e.to_string(),
                });
                if failures >= MAX_CONSECUTIVE_FAILURES {
                    reporter.report(&HarvestEvent::CategoryAborted {
                        id: category.id,
                        page,
                    });
                    break;
                }
                page += 1;
                continue;
            }
        };
        pages_fetched += 1;

        // The first fetched page establishes the budget; later totals are
        // ignored so a drifting upstream count cannot extend the loop.
        if planned.is_none() {
            if let Some(total) = raw.total_pages {
                let limit = if max_pages > 0 {
                    total.min(max_pages)
                } else {
                    total
                };
                planned = Some(limit.max(1));
            }
        }

        let matched = raw.candidates.len();
        let mut fresh = 0;

        for mut record in raw.candidates {
            if let Err(reason) = validator.check(&record) {
                reporter.report(&HarvestEvent::RecordRejected {
                    page,
                    mpn: record.mpn.clone(),
                    lcsc_code: record.lcsc_code.clone(),
                    reason: reason.to_string(),
                });
                continue;
            }

            if aggregator.contains(&record.key()) {
                continue;
            }

            if record.description.is_empty() {
                resolver.resolve(&mut record, pacer);
            }

            aggregator.insert(record);
            fresh += 1;
        }

        reporter.report(&HarvestEvent::PageFetched {
            page,
            matched,
            fresh,
            running_total: aggregator.len(),
        });

        if fresh == 0 {
            reporter.report(&HarvestEvent::PaginationStopped { page });
            break;
        }

        page += 1;
    }

    pages_fetched
}
