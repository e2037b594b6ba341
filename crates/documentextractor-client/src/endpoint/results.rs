//! Run results retrieval with `Accept`-based format negotiation.

use reqwest::Method;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;

use crate::types::{ResultFormat, RunResult, RunResultContent};
use crate::{Error, ExtractorClient, Result, TRACING_TARGET_RUNS};

/// Query parameter carrying the format option.
const FORMAT_OPTION_PARAM: &str = "format_option";

/// Fetches results from `path`, decoding the body according to `format`.
pub(super) async fn fetch(
    client: &ExtractorClient,
    path: &str,
    format: ResultFormat,
    format_option: Option<&str>,
) -> Result<RunResultContent> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(format.media_type()));

    let mut dispatch = client.dispatch(Method::GET, path).headers(headers);
    if let Some(option) = format_option.filter(|option| !option.is_empty()) {
        dispatch = dispatch.query(FORMAT_OPTION_PARAM, option);
    }

    let url = format!("{}{}", client.root_url(), path);
    let response = dispatch.send().await?;

    let content = match format {
        ResultFormat::Json => {
            let text = response
                .text()
                .await
                .map_err(|e| Error::transport(&url, e))?;
            RunResultContent::Structured(decode_run_result(&text)?)
        }
        ResultFormat::Csv => RunResultContent::Csv(
            response
                .text()
                .await
                .map_err(|e| Error::transport(&url, e))?,
        ),
        ResultFormat::Excel => RunResultContent::Excel(
            response
                .bytes()
                .await
                .map_err(|e| Error::transport(&url, e))?,
        ),
    };

    tracing::debug!(
        target: TRACING_TARGET_RUNS,
        path = %path,
        format = format.file_extension(),
        "Run results received"
    );

    Ok(content)
}

/// Decodes a JSON results body in two steps so syntax errors and shape
/// mismatches are reported separately.
fn decode_run_result(text: &str) -> Result<RunResult> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        Error::invalid_response(
            format!("Failed to decode JSON response for RunResult: {e}"),
            Some(text.to_owned()),
        )
    })?;

    serde_json::from_value(value).map_err(|e| {
        Error::invalid_response(
            format!("Mismatched JSON structure for RunResult: {e}"),
            Some(text.to_owned()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_well_formed() {
        let result =
            decode_run_result(r#"{"extracted_data": [{"data": {"total": 12.5}}], "errors": []}"#)
                .unwrap();
        assert_eq!(result.extracted_data.len(), 1);
        assert_eq!(result.extracted_data[0].data["total"], 12.5);
    }

    #[test]
    fn test_decode_syntax_error() {
        let err = decode_run_result("{not json").unwrap_err();
        assert!(err.is_value_error());

        let Error::InvalidResponse { message, body } = err else {
            panic!("expected InvalidResponse, got {err:?}");
        };
        assert!(message.starts_with("Failed to decode JSON response for RunResult"));
        assert_eq!(body.as_deref(), Some("{not json"));
    }

    #[test]
    fn test_decode_shape_mismatch() {
        let err = decode_run_result(r#"{"rows": []}"#).unwrap_err();

        let Error::InvalidResponse { message, .. } = err else {
            panic!("expected InvalidResponse, got {err:?}");
        };
        assert!(message.starts_with("Mismatched JSON structure for RunResult"));
    }
}
