//! DocumentExtractor HTTP client module.
//!
//! This module provides the client, its configuration, and the request
//! dispatcher every resource endpoint is built on.

mod dispatch;
mod extractor_client;
mod extractor_config;

pub use dispatch::merge_headers;
pub use extractor_client::ExtractorClient;
pub use extractor_config::{DEFAULT_ROOT_URL, ExtractorConfig};
