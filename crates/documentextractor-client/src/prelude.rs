//! Prelude module for documentextractor-client.
//!
//! Re-exports the client, its configuration, and the request and response
//! types most callers need.

pub use crate::client::{ExtractorClient, ExtractorConfig};
pub use crate::endpoint::FileUpload;
pub use crate::error::{Error, Result};
pub use crate::types::{
    ExtractionSchema, FileResponse, ResultFormat, RunCreate, RunResponse, RunResult,
    RunResultContent, RunStatus, ValueType, WorkflowCreate, WorkflowResponse, WorkflowUpdate,
};
