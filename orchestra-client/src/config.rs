//! Client configuration.
//!
//! A [`ClientConfig`] is the only state a client carries besides its
//! connection pool: the orchestrator base URL, the API key, and the
//! per-request HTTP timeout.

use std::time::Duration;

use url::Url;

use crate::error::ClientError;

/// Default base URL of a locally running orchestrator.
pub const DEFAULT_API_URL: &str = "http://localhost:3001/api/v1";

/// Default per-request HTTP timeout.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Client Config
// ============================================================================

/// Connection settings for the orchestrator API.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL with trailing slashes removed.
    pub api_url: String,
    /// Bearer token sent on every request.
    pub api_key: String,
    /// Timeout for a single HTTP request (not the poll budget).
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Creates a config for the given base URL and key.
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: normalize_api_url(&api_url.into()),
            api_key: api_key.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Creates a builder for customizing the config.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Parses the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidConfig` if the URL does not parse or
    /// cannot carry a path (e.g. `mailto:`).
    pub fn base_url(&self) -> Result<Url, ClientError> {
        let url = Url::parse(&self.api_url)
            .map_err(|e| ClientError::InvalidConfig(format!("api_url {:?}: {e}", self.api_url)))?;

        if url.cannot_be_a_base() {
            return Err(ClientError::InvalidConfig(format!(
                "api_url {:?} cannot be used as a base URL",
                self.api_url
            )));
        }

        Ok(url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, "")
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("api_key_set", &!self.api_key.is_empty())
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Strips trailing slashes so endpoint paths can be appended verbatim.
fn normalize_api_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ClientConfig`].
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_url: Option<String>,
    api_key: Option<String>,
    request_timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the per-request HTTP timeout.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builds the config, validating the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidConfig` if the base URL is unusable.
    pub fn build(self) -> Result<ClientConfig, ClientError> {
        let mut config = ClientConfig::new(
            self.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            self.api_key.unwrap_or_default(),
        );
        if let Some(timeout) = self.request_timeout {
            config.request_timeout = timeout;
        }

        config.base_url()?;
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        let config = ClientConfig::new("http://host/api/", "key");
        assert_eq!(config.api_url, "http://host/api");

        let config = ClientConfig::new("http://host/api//", "key");
        assert_eq!(config.api_url, "http://host/api");
    }

    #[test]
    fn test_builder_defaults() {
        let config = ClientConfig::builder().build().unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.api_key.is_empty());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        assert!(ClientConfig::builder().api_url("not a url").build().is_err());
        assert!(ClientConfig::builder().api_url("mailto:ops@example.com").build().is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let config = ClientConfig::new("http://host", "sk_live_secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk_live_secret"));
        assert!(debug.contains("api_key_set: true"));
    }
}
