//! Pagination strategy implementations
//!
//! One strategy per API generation; both page by offset and differ only
//! in how they recognise the last page.

use super::types::{PaginationState, Paginator, CREATED_AT_FORMAT};
use crate::error::{Error, Result};
use crate::types::ApiVersion;
use chrono::NaiveDateTime;
use serde_json::Value;
use tracing::{debug, warn};

/// Build the paginator for a stream's API version
pub fn paginator_for(version: ApiVersion) -> Box<dyn Paginator> {
    match version {
        ApiVersion::V3 => Box::new(EnvelopePaginator),
        ApiVersion::V4 => Box::new(FlatPaginator),
    }
}

// ============================================================================
// Flat (v4) Pagination
// ============================================================================

/// Full-page heuristic for `{"items": [...]}` pages
///
/// A full page means there may be more. When the total is an exact
/// multiple of the page size this costs one trailing empty request.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatPaginator;

impl Paginator for FlatPaginator {
    fn has_more(&self, body: &Value, state: &mut PaginationState) -> Result<bool> {
        let items = body
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::envelope("expected an 'items' array"))?;

        Ok(items.len() as u64 >= state.page_size())
    }
}

// ============================================================================
// Envelope (v3) Pagination
// ============================================================================

/// Watermark heuristic for `{"response": {"count", "items"}}` pages
///
/// The export endpoints can keep serving the same tail page past the end
/// of the data. A page only counts as progress if its newest `createdAt`
/// is newer than anything seen before; items without `createdAt` fall
/// back to comparing `count` against the page size.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopePaginator;

impl Paginator for EnvelopePaginator {
    fn has_more(&self, body: &Value, state: &mut PaginationState) -> Result<bool> {
        let response = body
            .get("response")
            .ok_or_else(|| Error::envelope("expected a 'response' object"))?;
        let count = response
            .get("count")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::envelope("expected a non-negative integer 'response.count'"))?;
        // an empty export may omit `items` entirely
        if count == 0 {
            return Ok(false);
        }

        let items = response
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::envelope("expected a 'response.items' array"))?;
        if items.is_empty() {
            return Ok(false);
        }

        match newest_created_at(items)? {
            Some(ts) => {
                let advanced = state.observe_timestamp(ts);
                if !advanced {
                    debug!(
                        "Newest createdAt {} does not pass watermark {}, stopping",
                        ts,
                        state.max_seen_timestamp()
                    );
                }
                Ok(advanced)
            }
            None => {
                warn!("Page items lack createdAt, falling back to count {count}");
                Ok(count >= state.page_size())
            }
        }
    }
}

/// Newest `createdAt` on a page, or `None` once an item lacks the field
fn newest_created_at(items: &[Value]) -> Result<Option<NaiveDateTime>> {
    let mut newest: Option<NaiveDateTime> = None;

    for item in items {
        let Value::Object(fields) = item else {
            return Err(Error::envelope("expected items to be objects"));
        };
        let Some(raw) = fields.get("createdAt") else {
            return Ok(None);
        };
        let ts = parse_created_at(raw)?;
        newest = Some(newest.map_or(ts, |n| n.max(ts)));
    }

    Ok(newest)
}

/// Parse a `createdAt` value such as `2023-04-01T08:30:00.000Z`
///
/// The fractional seconds are mandatory.
pub(crate) fn parse_created_at(raw: &Value) -> Result<NaiveDateTime> {
    let s = raw
        .as_str()
        .ok_or_else(|| Error::timestamp(raw.to_string(), "expected a string"))?;

    if !has_fraction(s) {
        return Err(Error::timestamp(s, "missing fractional seconds"));
    }

    NaiveDateTime::parse_from_str(s, CREATED_AT_FORMAT)
        .map_err(|e| Error::timestamp(s, e.to_string()))
}

/// `%.f` also accepts a bare `HH:MM:SSZ`, so check for `.digits` before `Z`
fn has_fraction(s: &str) -> bool {
    s.strip_suffix('Z')
        .and_then(|rest| rest.rsplit_once('.'))
        .is_some_and(|(_, frac)| !frac.is_empty() && frac.bytes().all(|b| b.is_ascii_digit()))
}
