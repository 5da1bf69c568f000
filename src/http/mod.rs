//! HTTP transport module
//!
//! Provides the `HttpFetcher` capability the sync engine pulls pages
//! through, and a reqwest-backed implementation with retries.
//!
//! # Features
//!
//! - **Automatic Retries**: transient failures are retried with backoff
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Authentication**: an injected `Authenticator` decorates each request

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, HttpFetcher};
