//! Configuration for the API client.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Default backend base URL used by local development setups.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the quizforge API client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL every endpoint path is joined onto.
    pub base_url: Url,
    /// Default timeout for HTTP requests.
    pub timeout: Duration,
    /// User-Agent header to send with requests.
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is well-formed"),
            timeout: DEFAULT_TIMEOUT,
            user_agent: Self::default_user_agent(),
        }
    }
}

impl ApiClientConfig {
    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("quizforge/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Creates a configuration from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the string is not a valid URL.
    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Configuration(format!("invalid base URL: {e}")))?;
        Ok(Self {
            base_url,
            ..Self::default()
        })
    }

    /// Creates a new configuration with the specified base URL.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Creates a new configuration with the specified timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Creates a new configuration with the specified user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the base URL is not http(s) or
    /// cannot carry path segments.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(Error::Configuration(format!(
                "unsupported URL scheme: {}",
                self.base_url.scheme()
            )));
        }
        if self.base_url.cannot_be_a_base() {
            return Err(Error::Configuration(
                "base URL cannot carry path segments".into(),
            ));
        }
        Ok(())
    }

    /// Builds the full URL for an endpoint from its path segments.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }

    /// Returns the effective timeout, using the default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            self.timeout
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ApiClientConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:3000/api");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.contains("quizforge"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_joins_onto_base_path() {
        let config = ApiClientConfig::default();
        let url = config.endpoint(&["quiz", "status", "abc123"]);
        assert_eq!(url.as_str(), "http://localhost:3000/api/quiz/status/abc123");
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let config = ApiClientConfig::from_base_url("http://localhost:3000/api/").unwrap();
        let url = config.endpoint(&["sessions"]);
        assert_eq!(url.as_str(), "http://localhost:3000/api/sessions");
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let config = ApiClientConfig::from_base_url("ftp://example.com/api").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_base_url_rejects_garbage() {
        assert!(ApiClientConfig::from_base_url("not a url").is_err());
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = ApiClientConfig::default().with_timeout(Duration::ZERO);
        assert_eq!(config.effective_timeout(), DEFAULT_TIMEOUT);
    }
}
