//! Transfer objects exchanged with the DocumentExtractor API.
//!
//! These records mirror the service's JSON payloads. They validate shape only
//! (required fields and field types); business rules are enforced by the
//! service.

mod file;
mod result;
mod run;
mod timestamp;
mod workflow;

pub use file::FileResponse;
pub use result::{ExtractedItem, ResultFormat, RunResult, RunResultContent};
pub use run::{RunCreate, RunResponse, RunStatus};
pub use workflow::{ExtractionSchema, ValueType, WorkflowCreate, WorkflowResponse, WorkflowUpdate};
