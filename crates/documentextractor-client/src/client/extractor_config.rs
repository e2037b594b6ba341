//! Configuration for the DocumentExtractor HTTP client.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use url::Url;

use crate::{Error, Result};

/// Default root URL of the hosted DocumentExtractor API.
pub const DEFAULT_ROOT_URL: &str = "https://api.documentextractor.ai";

/// Configuration for the DocumentExtractor HTTP client.
///
/// The root URL and API key are fixed once the client is constructed; every
/// request is resolved against the root URL and authenticated with the key.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use documentextractor_client::ExtractorConfig;
///
/// let config = ExtractorConfig::new("https://api.documentextractor.ai/", "my-api-key")
///     .with_timeout(Duration::from_secs(60));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ExtractorConfig {
    /// Root URL of the DocumentExtractor API.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "api-url",
            env = "DOCUMENTEXTRACTOR_API_URL",
            default_value = DEFAULT_ROOT_URL
        )
    )]
    pub root_url: String,

    /// API key sent as a bearer token on every request.
    #[cfg_attr(
        feature = "config",
        arg(long = "api-key", env = "DOCUMENTEXTRACTOR_API_KEY", hide_env_values = true)
    )]
    pub api_key: String,

    /// Transport timeout; unset means no timeout.
    ///
    /// On the command line this is given in seconds and may be fractional.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "timeout-secs",
            env = "DOCUMENTEXTRACTOR_TIMEOUT",
            value_name = "SECONDS",
            value_parser = parse_timeout_secs
        )
    )]
    pub timeout: Option<Duration>,

    /// User agent string for HTTP requests.
    #[cfg_attr(
        feature = "config",
        arg(long = "user-agent", env = "DOCUMENTEXTRACTOR_USER_AGENT", default_value_t = default_user_agent())
    )]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("documentextractor-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Parses a timeout given in (possibly fractional) seconds.
#[cfg(feature = "config")]
fn parse_timeout_secs(value: &str) -> std::result::Result<Duration, String> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid number of seconds '{value}': {e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout '{value}': {e}"))
}

impl ExtractorConfig {
    /// Create a new configuration with the given root URL and API key.
    pub fn new(root_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            api_key: api_key.into(),
            timeout: None,
            user_agent: default_user_agent(),
        }
    }

    /// Set the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Get the transport timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the root URL with every trailing slash removed.
    pub fn normalized_root_url(&self) -> &str {
        self.root_url.trim_end_matches('/')
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the root URL is not an absolute http(s) URL, the
    /// API key is empty, or the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        let root_url = self.normalized_root_url();
        let parsed = Url::parse(root_url)
            .map_err(|e| Error::config(format!("Invalid root URL '{}': {}", self.root_url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "Root URL '{}' must use http or https",
                self.root_url
            )));
        }

        if self.api_key.trim().is_empty() {
            return Err(Error::config("API key cannot be empty"));
        }

        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(Error::config("Timeout must be greater than 0"));
        }

        Ok(())
    }
}

impl fmt::Debug for ExtractorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorConfig")
            .field("root_url", &self.root_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
