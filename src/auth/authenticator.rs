//! Authenticator implementations
//!
//! Handles applying authentication to HTTP requests.

use crate::config::TapConfig;
use crate::error::{Error, Result};
use reqwest::RequestBuilder;
use std::fmt;

/// Applies credentials to an outgoing request
pub trait Authenticator: Send + Sync {
    /// Apply authentication to a request builder
    fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder>;
}

/// Sends `Authorization: Bearer <token>` with every request
#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl BearerTokenAuthenticator {
    /// Create an authenticator for a token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Create an authenticator from the tap's `api_key` setting
    pub fn from_config(config: &TapConfig) -> Self {
        Self::new(config.api_key.clone())
    }
}

impl Authenticator for BearerTokenAuthenticator {
    fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        if self.token.trim().is_empty() {
            return Err(Error::auth("bearer token is empty"));
        }
        Ok(req.bearer_auth(&self.token))
    }
}

impl fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerTokenAuthenticator")
            .finish_non_exhaustive()
    }
}
