use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Value type of an extraction schema field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Free text
    #[default]
    Text,
    /// Integer or decimal number
    Number,
    /// Calendar date
    Date,
    /// True/false flag
    Boolean,
}

/// A node of an extraction schema tree.
///
/// The root node describes the document as a whole; each child describes one
/// field to extract. `is_array` marks fields that may occur several times,
/// e.g. invoice line items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractionSchema {
    /// Identifier assigned by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Machine-readable key of the field in extracted data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Display name
    pub name: String,

    /// Value type of the field
    #[serde(rename = "type", default)]
    pub value_type: ValueType,

    /// Whether the field holds a list of values
    #[serde(default)]
    pub is_array: bool,

    /// Instructions for the extraction engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Nested fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExtractionSchema>,
}

impl ExtractionSchema {
    /// Create a schema node with a display name and value type.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            ..Default::default()
        }
    }

    /// Create a field node with a key, display name, and value type.
    pub fn field(key: impl Into<String>, name: impl Into<String>, value_type: ValueType) -> Self {
        Self::new(name, value_type).with_key(key)
    }

    /// Set the field key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the field as a list of values.
    #[must_use]
    pub fn with_array(mut self, is_array: bool) -> Self {
        self.is_array = is_array;
        self
    }

    /// Replace the nested fields.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = ExtractionSchema>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Number of nodes in this tree, including the root.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ExtractionSchema::node_count)
            .sum::<usize>()
    }
}

/// Payload for creating or fully replacing a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowCreate {
    /// Workflow name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Schema of the data to extract
    pub extraction_schema: ExtractionSchema,
}

impl WorkflowCreate {
    /// Create a payload from a name and an extraction schema.
    pub fn new(name: impl Into<String>, extraction_schema: ExtractionSchema) -> Self {
        Self {
            name: name.into(),
            description: None,
            extraction_schema,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Payload for partially updating a workflow.
///
/// Only fields that are set are sent; everything else is left untouched by
/// the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkflowUpdate {
    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New extraction schema
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_schema: Option<ExtractionSchema>,
}

impl WorkflowUpdate {
    /// Set the new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the new extraction schema.
    #[must_use]
    pub fn with_extraction_schema(mut self, schema: ExtractionSchema) -> Self {
        self.extraction_schema = Some(schema);
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.extraction_schema.is_none()
    }
}

/// A workflow stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowResponse {
    /// Unique workflow identifier
    pub id: Uuid,

    /// Workflow name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Schema of the data to extract
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_schema: Option<ExtractionSchema>,

    /// Creation time
    #[serde(
        default,
        with = "super::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,

    /// Last modification time
    #[serde(
        default,
        with = "super::timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
}
