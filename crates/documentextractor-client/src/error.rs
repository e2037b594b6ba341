//! Error taxonomy for DocumentExtractor API operations.
//!
//! Every failure produced by this crate is an [`Error`]. HTTP failures are
//! classified by status code into a small set of kinds so that callers can
//! branch on "authentication", "authorization", "my request was bad" or "the
//! service is broken" without inspecting status codes themselves. Local
//! misuse and undecodable success bodies are reported as value errors, see
//! [`Error::is_value_error`].

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Result type for all DocumentExtractor operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Raw text bodies shorter than this are folded into client error messages.
const SHORT_BODY_LIMIT: usize = 100;

/// Best-effort decoded body of a failed response.
///
/// The body is decoded as JSON when possible and kept as text otherwise, so
/// that building an error never fails a second time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// Body was valid JSON.
    Json(Value),
    /// Body was not JSON; carried verbatim (lossy UTF-8).
    Text(String),
}

impl ErrorBody {
    /// Decodes a response body, trying JSON first and falling back to text.
    ///
    /// Returns `None` for an empty body.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => Some(Self::Json(value)),
            Err(_) => Some(Self::Text(String::from_utf8_lossy(bytes).into_owned())),
        }
    }

    /// Returns the `detail` member when the body is a JSON object carrying a
    /// non-empty one.
    pub fn detail(&self) -> Option<&Value> {
        match self {
            Self::Json(Value::Object(map)) => map.get("detail").filter(|value| is_truthy(value)),
            _ => None,
        }
    }

    /// Returns the body as text when it is plain text or a bare JSON string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Json(Value::String(text)) => Some(text),
            Self::Json(_) => None,
        }
    }

    /// Returns the body as JSON, if it was decoded as such.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Comprehensive error types for DocumentExtractor operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service rejected the credentials (HTTP 401).
    #[error("Authentication failed")]
    Authentication {
        /// Best-effort decoded response body
        details: Option<ErrorBody>,
    },

    /// The credentials are valid but lack access to the resource (HTTP 403).
    #[error("Access forbidden")]
    Forbidden {
        /// Best-effort decoded response body
        details: Option<ErrorBody>,
    },

    /// Any other 4xx response.
    #[error("{message}")]
    ClientRequest {
        /// HTTP status code
        status: u16,
        /// Human-readable message derived from the body when possible
        message: String,
        /// Best-effort decoded response body
        details: Option<ErrorBody>,
    },

    /// A 5xx response.
    #[error("{message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Generic server error message
        message: String,
        /// Best-effort decoded response body
        details: Option<ErrorBody>,
    },

    /// Catch-all for unexpected statuses and transport failures.
    #[error("{message}")]
    Api {
        /// Description including the request URL
        message: String,
        /// HTTP status code, when a response was received at all
        status: Option<u16>,
        /// Best-effort decoded response body
        details: Option<ErrorBody>,
        /// Underlying transport error
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Malformed local input, detected before any request is sent.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what's invalid
        message: String,
    },

    /// The requested result format is not one the service can produce.
    #[error("Unsupported result format: {format}")]
    UnsupportedFormat {
        /// The rejected format as given by the caller
        format: String,
    },

    /// A successful response whose body could not be decoded.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what's invalid
        message: String,
        /// Optional raw response body for debugging
        body: Option<String>,
    },

    /// Client configuration errors.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Reading an upload from disk failed.
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(message: impl Into<String>, body: Option<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            body,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Wraps a transport failure that happened while talking to `url`.
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Api {
            message: format!("Request failed for {url}: {source}"),
            status: source.status().map(|status| status.as_u16()),
            details: None,
            source: Some(source),
        }
    }

    /// Classifies a non-2xx response.
    ///
    /// This is a pure function of the status code and the decoded body; `url`
    /// only feeds the message of the catch-all kind.
    pub(crate) fn from_status(status: u16, details: Option<ErrorBody>, url: &str) -> Self {
        match status {
            401 => Self::Authentication { details },
            403 => Self::Forbidden { details },
            400..=499 => Self::ClientRequest {
                status,
                message: client_error_message(status, details.as_ref()),
                details,
            },
            500..=599 => Self::Server {
                status,
                message: format!("Server error {status}"),
                details,
            },
            _ => Self::Api {
                message: format!("HTTP Error {status} for {url}"),
                status: Some(status),
                details,
                source: None,
            },
        }
    }

    /// Get the HTTP status code, if this error came from an HTTP response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Authentication { .. } => Some(401),
            Error::Forbidden { .. } => Some(403),
            Error::ClientRequest { status, .. } | Error::Server { status, .. } => Some(*status),
            Error::Api { status, .. } => *status,
            _ => None,
        }
    }

    /// Get the decoded response body carried by an HTTP-layer error.
    pub fn details(&self) -> Option<&ErrorBody> {
        match self {
            Error::Authentication { details }
            | Error::Forbidden { details }
            | Error::ClientRequest { details, .. }
            | Error::Server { details, .. }
            | Error::Api { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Check if this error reflects how the client was invoked, or a success
    /// body that could not be decoded, rather than a failed HTTP exchange.
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput { .. }
                | Error::UnsupportedFormat { .. }
                | Error::InvalidResponse { .. }
        )
    }

    /// Check if the service rejected the request as the caller's fault (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::Authentication { .. } | Error::Forbidden { .. } | Error::ClientRequest { .. }
        )
    }

    /// Check if this is a server-side error (5xx).
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Server { .. })
    }

    /// Get the error category for metrics/logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Authentication { .. } => "authentication",
            Error::Forbidden { .. } => "forbidden",
            Error::ClientRequest { .. } => "client_request",
            Error::Server { .. } => "server",
            Error::Api { .. } => "api",
            Error::InvalidInput { .. } => "invalid_input",
            Error::UnsupportedFormat { .. } => "unsupported_format",
            Error::InvalidResponse { .. } => "invalid_response",
            Error::Config { .. } => "config",
            Error::Io(_) => "io",
        }
    }
}

/// Builds the message of a [`Error::ClientRequest`].
fn client_error_message(status: u16, details: Option<&ErrorBody>) -> String {
    let Some(details) = details else {
        return format!("Client error {status}");
    };

    if let Some(detail) = details.detail() {
        return match detail {
            Value::String(text) => format!("Client error {status}: {text}"),
            other => format!("Client error {status}: {other}"),
        };
    }

    match details.as_text() {
        Some(text) if text.chars().count() < SHORT_BODY_LIMIT => {
            format!("Client error {status}: {text}")
        }
        _ => format!("Client error {status}"),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
