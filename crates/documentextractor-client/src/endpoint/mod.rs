//! Resource endpoints of the DocumentExtractor API.
//!
//! Each endpoint borrows an [`ExtractorClient`](crate::ExtractorClient) and
//! maps its operations onto a method, a path, and a payload.

mod files;
mod results;
mod runs;
mod workflows;

pub use files::{FileUpload, FilesEndpoint};
pub use runs::RunsEndpoint;
pub use workflows::WorkflowsEndpoint;
