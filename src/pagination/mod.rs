//! Pagination module
//!
//! Offset pagination for the Showpad export endpoints, with one
//! continuation strategy per API generation.
//!
//! # Overview
//!
//! `PaginationState` is the per-stream cursor: offset, page size and the
//! `createdAt` watermark. A `Paginator` inspects each fetched page and
//! decides whether the state should advance to another page. The state
//! is owned by the sync loop and lent to the paginator for each page.

mod strategies;
mod types;

pub use strategies::{paginator_for, EnvelopePaginator, FlatPaginator};
pub use types::{
    NextPage, PageParams, PaginationState, Paginator, CREATED_AT_FORMAT, DEFAULT_PAGE_SIZE,
};
