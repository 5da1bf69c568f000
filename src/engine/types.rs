//! Engine types
//!
//! Configuration and statistics for the sync engine.

use crate::error::{Error, Result};
use crate::pagination::DEFAULT_PAGE_SIZE;

/// Environment variable capping records per stream
pub const RECORD_LIMIT_ENV: &str = "SDK_DEBUG_RECORD_LIMIT";

/// Configuration for sync operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Records requested per page
    pub page_size: u64,
    /// Maximum records per stream (0 = unlimited)
    pub max_records: usize,
    /// API root replacing the one derived from the subdomain
    pub base_url: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_records: 0,
            base_url: None,
        }
    }
}

impl SyncConfig {
    /// Create a new sync config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, with the record limit taken from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, with the record limit taken from `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(RECORD_LIMIT_ENV) {
            config.max_records = raw.trim().parse().map_err(|_| {
                Error::invalid_value(RECORD_LIMIT_ENV, format!("'{raw}' is not a record count"))
            })?;
        }
        Ok(config)
    }

    /// Set page size
    #[must_use]
    pub fn with_page_size(mut self, size: u64) -> Self {
        self.page_size = size;
        self
    }

    /// Set max records
    #[must_use]
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = max;
        self
    }

    /// Override the API root
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Whether `count` records reach the limit
    pub fn limit_reached(&self, count: usize) -> bool {
        self.max_records > 0 && count >= self.max_records
    }
}

/// Statistics from a sync operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Total records synced
    pub records_synced: usize,
    /// Total pages fetched
    pub pages_fetched: usize,
    /// Total streams synced
    pub streams_synced: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add records
    pub fn add_records(&mut self, count: usize) {
        self.records_synced += count;
    }

    /// Add a page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Add a stream
    pub fn add_stream(&mut self) {
        self.streams_synced += 1;
    }

    /// Add to the duration
    pub fn add_duration(&mut self, ms: u64) {
        self.duration_ms += ms;
    }
}
