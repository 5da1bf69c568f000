//! Pagination types and traits
//!
//! Defines the cursor state and the continuation trait used by all strategies.

use crate::error::Result;
use chrono::NaiveDateTime;
use serde_json::Value;

/// Records requested per page
pub const DEFAULT_PAGE_SIZE: u64 = 50_000;

/// Format of the `createdAt` field on v3 export items
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Result of processing one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch another page starting at this offset
    Continue {
        /// Offset of the next page
        offset: u64,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Query parameters for one page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// Offset of the first record; absent on the first request
    pub offset: Option<u64>,
    /// Page size
    pub limit: u64,
}

impl PageParams {
    /// Render as query pairs, `offset` first when present
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        params.push(("limit".to_string(), self.limit.to_string()));
        params
    }
}

/// Cursor for one stream sync
///
/// The offset only ever moves forward by whole pages and the watermark
/// only ever moves forward in time.
#[derive(Debug, Clone)]
pub struct PaginationState {
    /// Offset of the page about to be (or last) requested
    offset: u64,
    /// Records per page
    page_size: u64,
    /// Newest `createdAt` seen on any page so far
    max_seen_timestamp: NaiveDateTime,
    /// Token handed to the next request, if any
    next_token: Option<u64>,
    /// Pages processed so far
    pages_fetched: u64,
    /// Is pagination complete?
    done: bool,
}

impl PaginationState {
    /// Create a cursor starting at offset 0
    pub fn new(page_size: u64) -> Self {
        Self::with_start_offset(0, page_size)
    }

    /// Create a cursor starting at an arbitrary offset
    pub fn with_start_offset(start: u64, page_size: u64) -> Self {
        Self {
            offset: start,
            // a zero page size would never advance
            page_size: page_size.max(1),
            // NaiveDateTime's default is the Unix epoch
            max_seen_timestamp: NaiveDateTime::default(),
            next_token: (start > 0).then_some(start),
            pages_fetched: 0,
            done: false,
        }
    }

    /// Offset of the current page
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Pages processed so far
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    /// Is pagination complete?
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Records per page
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Newest `createdAt` seen so far
    pub fn max_seen_timestamp(&self) -> NaiveDateTime {
        self.max_seen_timestamp
    }

    /// Token for the next request, if pagination has advanced
    pub fn next_token(&self) -> Option<u64> {
        self.next_token
    }

    /// Parameters for a request given the token of the previous page
    pub fn next_request_params(&self, previous_token: Option<u64>) -> PageParams {
        PageParams {
            offset: previous_token,
            limit: self.page_size,
        }
    }

    /// Parameters for the next request from the current token
    pub fn request_params(&self) -> PageParams {
        self.next_request_params(self.next_token)
    }

    /// Move to the next page and return its offset
    pub fn advance(&mut self) -> u64 {
        self.offset += self.page_size;
        self.next_token = Some(self.offset);
        self.offset
    }

    /// Raise the watermark if `ts` is newer; returns whether it moved
    pub fn observe_timestamp(&mut self, ts: NaiveDateTime) -> bool {
        if ts > self.max_seen_timestamp {
            self.max_seen_timestamp = ts;
            true
        } else {
            false
        }
    }

    /// Count a processed page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }
}

/// Decides whether another page follows the one just fetched
pub trait Paginator: Send + Sync {
    /// Inspect a page body; may move the state's watermark
    fn has_more(&self, body: &Value, state: &mut PaginationState) -> Result<bool>;

    /// Process a page and advance the cursor when more pages follow
    fn process_response(&self, body: &Value, state: &mut PaginationState) -> Result<NextPage> {
        state.add_page();

        if self.has_more(body, state)? {
            let offset = state.advance();
            Ok(NextPage::Continue { offset })
        } else {
            state.mark_done();
            Ok(NextPage::Done)
        }
    }
}
