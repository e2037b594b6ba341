#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for the main library
pub const TRACING_TARGET: &str = "documentextractor_client";

/// Tracing target for client construction
pub const TRACING_TARGET_CLIENT: &str = "documentextractor_client::client";

/// Tracing target for request dispatch and failure classification
pub const TRACING_TARGET_DISPATCH: &str = "documentextractor_client::dispatch";

/// Tracing target for file operations
pub const TRACING_TARGET_FILES: &str = "documentextractor_client::files";

/// Tracing target for workflow operations
pub const TRACING_TARGET_WORKFLOWS: &str = "documentextractor_client::workflows";

/// Tracing target for run and result operations
pub const TRACING_TARGET_RUNS: &str = "documentextractor_client::runs";

mod client;
mod endpoint;
mod error;
#[doc(hidden)]
pub mod prelude;
pub mod types;

pub use crate::client::{DEFAULT_ROOT_URL, ExtractorClient, ExtractorConfig, merge_headers};
pub use crate::endpoint::{FileUpload, FilesEndpoint, RunsEndpoint, WorkflowsEndpoint};
pub use crate::error::{Error, ErrorBody, Result};
