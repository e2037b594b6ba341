//! DocumentExtractor HTTP client implementation.

use std::sync::Arc;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use uuid::Uuid;

use super::ExtractorConfig;
use super::dispatch::Dispatch;
use crate::endpoint::{FilesEndpoint, RunsEndpoint, WorkflowsEndpoint};
use crate::{Error, Result, TRACING_TARGET_CLIENT};

/// Inner client that holds the HTTP client and immutable request settings.
struct ExtractorClientInner {
    http: Client,
    root_url: String,
    base_headers: HeaderMap,
    config: ExtractorConfig,
}

/// HTTP client for the DocumentExtractor API.
///
/// The client is cheap to clone and safe to share between tasks; it holds no
/// mutable state, and every operation performs exactly one HTTP round trip.
/// Operations are grouped by resource family:
///
/// - [`files`](Self::files): upload, list, inspect, and delete files
/// - [`workflows`](Self::workflows): manage extraction workflows
/// - [`runs`](Self::runs): trigger runs of a workflow and fetch their results
///
/// # Examples
///
/// ```no_run
/// use documentextractor_client::{ExtractorClient, ExtractorConfig, FileUpload};
///
/// # async fn example() -> documentextractor_client::Result<()> {
/// let config = ExtractorConfig::new("https://api.documentextractor.ai", "my-api-key");
/// let client = ExtractorClient::new(config)?;
///
/// let file = client.files().upload(FileUpload::from_path("invoice.pdf")).await?;
/// println!("Uploaded {} as {}", file.filename, file.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ExtractorClient {
    inner: Arc<ExtractorClientInner>,
}

impl std::fmt::Debug for ExtractorClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorClient")
            .field("root_url", &self.inner.root_url)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ExtractorClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Self::with_http_client(config, http)
    }

    /// Create a new client around a caller-configured [`reqwest::Client`].
    ///
    /// Transport settings such as timeouts and proxies are taken from `http`
    /// as-is; `config.timeout` and `config.user_agent` are not applied.
    pub fn with_http_client(config: ExtractorConfig, http: Client) -> Result<Self> {
        config.validate()?;

        let root_url = config.normalized_root_url().to_owned();
        let base_headers = Self::build_base_headers(&config.api_key)?;

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            root_url = %root_url,
            timeout = ?config.timeout(),
            "DocumentExtractor client initialized"
        );

        let inner = ExtractorClientInner {
            http,
            root_url,
            base_headers,
            config,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Create a new client from a root URL and an API key with default settings.
    pub fn from_api_key(root_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::new(ExtractorConfig::new(root_url, api_key))
    }

    /// Get a reference to the client configuration.
    pub fn config(&self) -> &ExtractorConfig {
        &self.inner.config
    }

    /// Get the root URL every request path is appended to.
    pub fn root_url(&self) -> &str {
        &self.inner.root_url
    }

    /// Operations on uploaded files.
    pub fn files(&self) -> FilesEndpoint<'_> {
        FilesEndpoint::new(self)
    }

    /// Operations on extraction workflows.
    pub fn workflows(&self) -> WorkflowsEndpoint<'_> {
        WorkflowsEndpoint::new(self)
    }

    /// Operations on the runs of one workflow.
    ///
    /// Run numbers are only meaningful relative to their workflow, so the
    /// workflow identifier is bound here once.
    pub fn runs(&self, workflow_id: Uuid) -> RunsEndpoint<'_> {
        RunsEndpoint::new(self, workflow_id)
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Headers sent with every request unless overridden.
    pub(crate) fn base_headers(&self) -> &HeaderMap {
        &self.inner.base_headers
    }

    /// Starts building a request against `path`.
    pub(crate) fn dispatch(&self, method: Method, path: &str) -> Dispatch<'_> {
        Dispatch::new(self, method, path)
    }

    fn build_base_headers(api_key: &str) -> Result<HeaderMap> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| Error::config(format!("Invalid API key: {e}")))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}
