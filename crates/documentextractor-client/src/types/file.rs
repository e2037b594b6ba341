use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A file stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResponse {
    /// Unique file identifier
    pub id: Uuid,

    /// Original file name
    pub filename: String,

    /// MIME type recorded at upload
    #[serde(default = "default_mime_type")]
    pub mime_type: String,

    /// Size in bytes, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Upload time
    #[serde(
        default,
        with = "super::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,
}

fn default_mime_type() -> String {
    mime_guess::mime::APPLICATION_OCTET_STREAM.to_string()
}
