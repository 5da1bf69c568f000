//! Tap configuration
//!
//! The settings a user supplies to run the tap: the API token, the
//! Showpad subdomain and an optional User-Agent. Settings come from a
//! JSON file or from `TAP_SHOWPAD_*` environment variables.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::fs;
use std::path::Path;

/// Default User-Agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "tap-showpad";

/// Prefix for settings read from the environment
pub const ENV_PREFIX: &str = "TAP_SHOWPAD_";

/// Runtime settings for the tap
#[derive(Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// Bearer token for the Showpad API
    #[serde(default)]
    pub api_key: String,

    /// Subdomain of the Showpad instance (`<subdomain>.showpad.biz`)
    #[serde(default)]
    pub subdomain: String,

    /// User-Agent header value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl TapConfig {
    /// Create a config from the two required settings
    pub fn new(api_key: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            subdomain: subdomain.into(),
            user_agent: None,
        }
    }

    /// Set the User-Agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
        Self::from_json(&content)
    }

    /// Build a config from `TAP_SHOWPAD_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{}", name.to_ascii_uppercase()));

        let config = Self {
            api_key: var("api_key").unwrap_or_default(),
            subdomain: var("subdomain").unwrap_or_default(),
            user_agent: var("user_agent"),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and value shapes
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        if self.subdomain.trim().is_empty() {
            return Err(Error::missing_field("subdomain"));
        }
        if !self
            .subdomain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(Error::invalid_value(
                "subdomain",
                "only letters, digits and '-' are allowed",
            ));
        }
        Ok(())
    }

    /// User-Agent to send, falling back to the default
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// JSON Schema describing the accepted settings
    pub fn json_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "api_key": {
                    "type": "string",
                    "secret": true,
                    "description": "The token to authenticate against the API service"
                },
                "subdomain": {
                    "type": "string",
                    "description": "The subdomain of your Showpad instance"
                },
                "user_agent": {
                    "type": "string",
                    "default": DEFAULT_USER_AGENT,
                    "description": "User-Agent header sent with every request"
                }
            },
            "required": ["api_key", "subdomain"]
        })
    }
}

impl fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TapConfig")
            .field("api_key", &"<redacted>")
            .field("subdomain", &self.subdomain)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_from_json() {
        let config = TapConfig::from_json(r#"{"api_key": "tok", "subdomain": "acme"}"#).unwrap();
        assert_eq!(config.api_key, "tok");
        assert_eq!(config.subdomain, "acme");
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_custom_user_agent() {
        let config = TapConfig::from_json(
            r#"{"api_key": "tok", "subdomain": "acme", "user_agent": "etl/2.0"}"#,
        )
        .unwrap();
        assert_eq!(config.user_agent(), "etl/2.0");
    }

    #[test]
    fn test_missing_required_fields() {
        let err = TapConfig::from_json(r#"{"subdomain": "acme"}"#).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { field } if field == "api_key"));

        let err = TapConfig::from_json(r#"{"api_key": "tok", "subdomain": "  "}"#).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { field } if field == "subdomain"));
    }

    #[test]
    fn test_invalid_subdomain() {
        let err = TapConfig::new("tok", "acme.evil.com/").validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let err = TapConfig::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("Invalid config JSON"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_key": "tok", "subdomain": "acme"}}"#).unwrap();

        let config = TapConfig::from_file(file.path()).unwrap();
        assert_eq!(config.subdomain, "acme");

        let err = TapConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("TAP_SHOWPAD_API_KEY", "env-token"),
            ("TAP_SHOWPAD_SUBDOMAIN", "acme"),
        ]
        .into_iter()
        .collect();

        let config = TapConfig::from_lookup(|k| vars.get(k).map(ToString::to_string)).unwrap();
        assert_eq!(config.api_key, "env-token");
        assert_eq!(config.subdomain, "acme");
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = TapConfig::new("super-secret", "acme");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_json_schema_required() {
        let schema = TapConfig::json_schema();
        assert_eq!(schema["required"], json!(["api_key", "subdomain"]));
        assert_eq!(schema["properties"]["api_key"]["secret"], true);
    }
}
