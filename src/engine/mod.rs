//! Execution engine module
//!
//! Main read loop and stream orchestration.
//!
//! # Overview
//!
//! The engine module provides:
//! - `SyncEngine` - Drives one stream at a time through its pages
//! - `SyncConfig` - Page size, record limit and API root override
//! - `SyncStats` - Counters accumulated across streams

mod types;

pub use types::{SyncConfig, SyncStats, RECORD_LIMIT_ENV};

use crate::decode::RecordExtractor;
use crate::error::Result;
use crate::http::HttpFetcher;
use crate::output::{Message, MessageWriter};
use crate::pagination::{paginator_for, PaginationState};
use crate::streams::StreamDescriptor;
use chrono::Utc;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sync engine for orchestrating data extraction
pub struct SyncEngine<F: HttpFetcher> {
    /// Page transport
    fetcher: F,
    /// Showpad subdomain the API roots are derived from
    subdomain: String,
    /// Sync configuration
    config: SyncConfig,
    /// Statistics
    stats: SyncStats,
}

impl<F: HttpFetcher> SyncEngine<F> {
    /// Create a new sync engine
    pub fn new(fetcher: F, subdomain: impl Into<String>) -> Self {
        Self {
            fetcher,
            subdomain: subdomain.into(),
            config: SyncConfig::default(),
            stats: SyncStats::default(),
        }
    }

    /// Set sync configuration
    #[must_use]
    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the sync configuration
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// API root a stream is fetched from
    pub fn base_url(&self, descriptor: &StreamDescriptor) -> String {
        match &self.config.base_url {
            Some(url) => url.clone(),
            None => descriptor.base_url(&self.subdomain),
        }
    }

    /// Sync one stream, writing its SCHEMA and RECORD messages
    ///
    /// Pages are fetched one after another until the stream's paginator
    /// reports the last page or the record limit is reached. Returns the
    /// number of records written.
    pub async fn sync_stream<W: Write>(
        &mut self,
        descriptor: &StreamDescriptor,
        writer: &mut MessageWriter<W>,
    ) -> Result<usize> {
        let start = Instant::now();
        let name = descriptor.name.as_str();
        let url = descriptor.url(&self.base_url(descriptor));
        let paginator = paginator_for(descriptor.api_version);
        let extractor = RecordExtractor::new(descriptor.records_path());
        let mut state = PaginationState::new(self.config.page_size);

        info!("Starting sync for stream: {name} ({url})");
        writer.write(&Message::schema(descriptor))?;

        let mut records = 0usize;
        let mut pages = 0usize;
        loop {
            let params = state.request_params();
            debug!(
                "Requesting {name} page {} (offset {:?}, limit {})",
                pages + 1,
                params.offset,
                params.limit
            );

            let body = self
                .fetcher
                .fetch(&url, &params.to_query())
                .await
                .inspect_err(|e| {
                    if e.is_transport() {
                        warn!("Stream {name}: request at offset {:?} failed", params.offset);
                    }
                })?;
            let extracted_at = Utc::now();
            pages += 1;
            self.stats.add_page();

            let page = extractor.records(&body)?;
            let page_len = page.len();
            for record in page {
                if self.config.limit_reached(records) {
                    break;
                }
                writer.write(&Message::record(name, record, Some(extracted_at)))?;
                records += 1;
            }
            debug!("Stream {name}: page of {page_len} records, {records} so far");

            if self.config.limit_reached(records) {
                info!("Stream {name}: record limit {} reached", self.config.max_records);
                break;
            }

            if paginator.process_response(&body, &mut state)?.is_done() {
                break;
            }
        }

        writer.flush()?;
        self.stats.add_records(records);
        self.stats.add_stream();
        self.stats.add_duration(start.elapsed().as_millis() as u64);

        info!("Completed sync for {name}: {records} records in {pages} pages");

        Ok(records)
    }
}
