//! Per-row pipeline: resolve, crawl, enrich, write
//!
//! Rows are processed strictly one after another. A problem with one row is
//! logged and counted; it never stops the run.

use crate::crawler::SiteCrawler;
use crate::input::InputRow;
use crate::output::{OutputRecord, RecordWriter, RunStatistics};
use crate::search::{Enricher, SiteResolver};
use crate::Result;
use std::path::PathBuf;
use std::time::Duration;

/// What happened to one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Written { path: PathBuf, services: usize },
    Skipped,
    Unresolved,
}

/// Drives input rows through the pipeline
pub struct RecordAssembler<'a> {
    resolver: &'a SiteResolver,
    crawler: SiteCrawler<'a>,
    writer: &'a RecordWriter,
    enricher: Option<&'a Enricher>,
    max_depth: u32,
    row_delay: Duration,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(
        resolver: &'a SiteResolver,
        crawler: SiteCrawler<'a>,
        writer: &'a RecordWriter,
        max_depth: u32,
        row_delay: Duration,
    ) -> Self {
        Self {
            resolver,
            crawler,
            writer,
            enricher: None,
            max_depth,
            row_delay,
        }
    }

    /// Adds the enrichment lookups; records are then written as `enhanced_*`
    pub fn with_enricher(mut self, enricher: &'a Enricher) -> Self {
        self.enricher = Some(enricher);
        self
    }

    /// Processes up to `max_rows` rows and returns the counts
    pub async fn run(&self, rows: &[InputRow], max_rows: Option<usize>) -> RunStatistics {
        let limit = max_rows.unwrap_or(rows.len()).min(rows.len());
        if limit < rows.len() {
            tracing::info!("Limited to first {} rows", limit);
        }
        let rows = &rows[..limit];

        let mut stats = RunStatistics {
            rows_total: rows.len(),
            ..Default::default()
        };

        for (i, row) in rows.iter().enumerate() {
            tracing::info!("Processing row {}/{}", i + 1, rows.len());

            match self.process_row(row).await {
                Ok(RowOutcome::Written { services, .. }) => {
                    stats.processed += 1;
                    stats.services_found += services;
                    if i + 1 < rows.len() && !self.row_delay.is_zero() {
                        tokio::time::sleep(self.row_delay).await;
                    }
                }
                Ok(RowOutcome::Skipped) => stats.skipped += 1,
                Ok(RowOutcome::Unresolved) => stats.unresolved += 1,
                Err(e) => {
                    tracing::error!("Error processing row {}: {}", row.row_number, e);
                    stats.failed += 1;
                }
            }
        }

        tracing::info!(
            "Processing complete. Successfully processed {} physician groups",
            stats.processed
        );
        stats
    }

    /// Runs one row end to end
    pub async fn process_row(&self, row: &InputRow) -> Result<RowOutcome> {
        if !row.has_group_name() {
            tracing::warn!("Skipping row {}: missing group name", row.row_number);
            return Ok(RowOutcome::Skipped);
        }

        let group_name = row.group_name.as_str();
        let physician_name = group_name;
        tracing::info!("Processing: {} - {}", group_name, row.address);

        let Some(website) = self
            .resolver
            .resolve(group_name, physician_name, &row.address)
            .await
        else {
            tracing::warn!("No website found for {}", group_name);
            return Ok(RowOutcome::Unresolved);
        };

        let services = self.crawler.crawl(&website, self.max_depth).await;
        tracing::info!("Extracted {} services for {}", services.len(), group_name);
        let count = services.len();

        let mut record = OutputRecord::new(group_name, physician_name, &row.address, &website, services);
        if let Some(enricher) = self.enricher {
            record = record.with_enrichment(enricher.enrich(group_name, &row.address).await);
        }

        let path = self.writer.write(&record)?;
        Ok(RowOutcome::Written {
            path,
            services: count,
        })
    }
}
