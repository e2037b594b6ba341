use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Lifecycle state of a run.
///
/// The set of states is owned by the service; states this client does not
/// know yet deserialize as [`RunStatus::Unknown`] with the raw value kept, so
/// they serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// Accepted but not yet scheduled
    Pending,
    /// Waiting for an extraction worker
    Queued,
    /// Extraction in progress
    Running,
    /// Finished; results are available
    Completed,
    /// Finished without results
    Failed,
    /// Stopped before completion
    Cancelled,
    /// A state not known to this client
    Unknown(String),
}

impl RunStatus {
    /// Returns true once the run will not change state anymore.
    ///
    /// Unknown states are never considered terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Returns true for states this client does not recognize.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for RunStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "queued" => Self::Queued,
            "running" => Self::Running,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            _ => Self::Unknown(value),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Payload for starting a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCreate {
    /// Files to extract from; at least one is required
    pub file_ids: Vec<Uuid>,
}

impl RunCreate {
    /// Create a payload for the given files.
    pub fn new(file_ids: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            file_ids: file_ids.into_iter().collect(),
        }
    }
}

/// A run of a workflow.
///
/// `run_num` is a sequence number scoped to `workflow_id`, not a global
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResponse {
    /// Workflow-scoped run number
    pub run_num: u32,

    /// Owning workflow
    pub workflow_id: Uuid,

    /// Files the run extracts from
    #[serde(default)]
    pub file_ids: Vec<Uuid>,

    /// Current state
    pub status: RunStatus,

    /// Creation time
    #[serde(
        default,
        with = "super::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,

    /// Last state change
    #[serde(
        default,
        with = "super::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
}
