use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::Error;

/// Encoding in which run results are requested.
///
/// The format is negotiated through the `Accept` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResultFormat {
    /// Structured JSON, decoded into [`RunResult`]
    #[default]
    Json,
    /// Comma-separated values, returned as text
    Csv,
    /// Excel spreadsheet, returned as raw bytes
    Excel,
}

impl ResultFormat {
    /// All supported formats.
    pub const ALL: [ResultFormat; 3] = [Self::Json, Self::Csv, Self::Excel];

    /// Media type sent in the `Accept` header.
    pub fn media_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }

    /// Conventional file extension for saved results.
    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Excel => "xlsx",
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_type())
    }
}

impl FromStr for ResultFormat {
    type Err = Error;

    /// Parses a short name (`json`, `csv`, `excel`, `xlsx`) or a media type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "json" => return Ok(Self::Json),
            "csv" => return Ok(Self::Csv),
            "excel" | "xlsx" => return Ok(Self::Excel),
            _ => {}
        }

        Self::ALL
            .into_iter()
            .find(|format| format.media_type() == normalized)
            .ok_or_else(|| Error::unsupported_format(s))
    }
}

/// Data extracted from one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// File the data was extracted from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<Uuid>,

    /// Extracted values, shaped by the workflow's schema
    pub data: Value,
}

/// Structured results of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// One entry per extracted document
    pub extracted_data: Vec<ExtractedItem>,

    /// Problems reported by the extraction engine
    #[serde(default)]
    pub errors: Vec<Value>,
}

impl RunResult {
    /// Returns true if the engine reported any problem.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Run results in the encoding that was requested.
#[derive(Debug, Clone, PartialEq)]
pub enum RunResultContent {
    /// Decoded JSON results
    Structured(RunResult),
    /// CSV text, verbatim
    Csv(String),
    /// Spreadsheet bytes, verbatim
    Excel(Bytes),
}

impl RunResultContent {
    /// The format this content was retrieved in.
    pub fn format(&self) -> ResultFormat {
        match self {
            Self::Structured(_) => ResultFormat::Json,
            Self::Csv(_) => ResultFormat::Csv,
            Self::Excel(_) => ResultFormat::Excel,
        }
    }

    /// Returns the structured results, if this is JSON content.
    pub fn as_structured(&self) -> Option<&RunResult> {
        match self {
            Self::Structured(result) => Some(result),
            _ => None,
        }
    }

    /// Returns the CSV text, if this is CSV content.
    pub fn as_csv(&self) -> Option<&str> {
        match self {
            Self::Csv(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the spreadsheet bytes, if this is Excel content.
    pub fn as_excel(&self) -> Option<&Bytes> {
        match self {
            Self::Excel(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Converts into the structured results, if this is JSON content.
    pub fn into_structured(self) -> Option<RunResult> {
        match self {
            Self::Structured(result) => Some(result),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_short_names() {
        assert_eq!("json".parse::<ResultFormat>().unwrap(), ResultFormat::Json);
        assert_eq!("CSV".parse::<ResultFormat>().unwrap(), ResultFormat::Csv);
        assert_eq!("excel".parse::<ResultFormat>().unwrap(), ResultFormat::Excel);
        assert_eq!("xlsx".parse::<ResultFormat>().unwrap(), ResultFormat::Excel);
    }

    #[test]
    fn test_parse_media_types() {
        for format in ResultFormat::ALL {
            assert_eq!(format.media_type().parse::<ResultFormat>().unwrap(), format);
            assert_eq!(format.to_string().parse::<ResultFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "application/xml".parse::<ResultFormat>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { ref format } if format == "application/xml"));
        assert!(err.is_value_error());
    }

    #[test]
    fn test_run_result_defaults_errors() {
        let result: RunResult = serde_json::from_value(json!({
            "extracted_data": [{"data": {"invoice_number": "INV-1"}}]
        }))
        .unwrap();

        assert!(!result.has_errors());
        assert_eq!(result.extracted_data[0].data["invoice_number"], "INV-1");
    }

    #[test]
    fn test_content_accessors() {
        let content = RunResultContent::Csv("a,b\n1,2\n".to_string());
        assert_eq!(content.format(), ResultFormat::Csv);
        assert_eq!(content.as_csv(), Some("a,b\n1,2\n"));
        assert!(content.as_structured().is_none());
        assert!(content.as_excel().is_none());
    }
}
