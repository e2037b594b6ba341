//! Single-request dispatch and failure classification.
//!
//! Every endpoint builds a [`Dispatch`] and finishes it with one of the
//! terminal methods. Each terminal method performs exactly one round trip;
//! non-2xx statuses and transport failures are classified here and nowhere
//! else.

use std::time::Instant;

use reqwest::header::HeaderMap;
use reqwest::multipart::Form;
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ExtractorClient;
use crate::{Error, ErrorBody, Result, TRACING_TARGET_DISPATCH};

/// Merges caller overrides into a base header set.
///
/// Base headers are applied first; every header name present in `overrides`
/// then replaces all base values for that name.
pub fn merge_headers(base: &HeaderMap, overrides: &HeaderMap) -> HeaderMap {
    let mut merged = base.clone();
    for name in overrides.keys() {
        merged.remove(name);
        for value in overrides.get_all(name) {
            merged.append(name.clone(), value.clone());
        }
    }
    merged
}

/// A request under construction.
#[must_use = "a dispatch does nothing until it is sent"]
pub(crate) struct Dispatch<'a> {
    client: &'a ExtractorClient,
    method: Method,
    url: String,
    json: Option<Value>,
    multipart: Option<Form>,
    headers: HeaderMap,
    query: Vec<(String, String)>,
}

impl<'a> Dispatch<'a> {
    pub(crate) fn new(client: &'a ExtractorClient, method: Method, path: &str) -> Self {
        Self {
            url: format!("{}{}", client.root_url(), path),
            client,
            method,
            json: None,
            multipart: None,
            headers: HeaderMap::new(),
            query: Vec::new(),
        }
    }

    /// Attach a JSON body.
    pub(crate) fn json_body(mut self, body: &impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            Error::invalid_input(format!("Failed to serialize request body: {e}"))
        })?;
        self.json = Some(value);
        Ok(self)
    }

    /// Attach a multipart form body.
    pub(crate) fn multipart(mut self, form: Form) -> Self {
        self.multipart = Some(form);
        self
    }

    /// Override headers for this request only.
    pub(crate) fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Append a query parameter.
    pub(crate) fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sends the request and returns the raw successful response.
    pub(crate) async fn send(self) -> Result<Response> {
        let Self {
            client,
            method,
            url,
            json,
            multipart,
            headers,
            query,
        } = self;

        let mut request = client
            .http()
            .request(method.clone(), &url)
            .headers(merge_headers(client.base_headers(), &headers));

        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = json {
            request = request.json(&body);
        }
        if let Some(form) = multipart {
            request = request.multipart(form);
        }

        let started_at = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET_DISPATCH,
                    method = %method,
                    url = %url,
                    error = %err,
                    timeout = err.is_timeout(),
                    connect = err.is_connect(),
                    "Request failed before a response was received"
                );
                return Err(Error::transport(&url, err));
            }
        };

        let status = response.status();
        tracing::debug!(
            target: TRACING_TARGET_DISPATCH,
            method = %method,
            url = %url,
            status = status.as_u16(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Received response"
        );

        if status.is_success() {
            return Ok(response);
        }

        let details = response
            .bytes()
            .await
            .ok()
            .and_then(|bytes| ErrorBody::parse(&bytes));
        let error = Error::from_status(status.as_u16(), details, &url);

        tracing::warn!(
            target: TRACING_TARGET_DISPATCH,
            method = %method,
            url = %url,
            status = status.as_u16(),
            category = error.category(),
            error = %error,
            "Request was rejected"
        );

        Err(error)
    }

    /// Sends the request and decodes the JSON body; `None` for 204 No Content.
    pub(crate) async fn json_opt<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let url = self.url.clone();
        let response = self.send().await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::transport(&url, e))?;

        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            Error::invalid_response(
                format!(
                    "Failed to decode {} response: {e}",
                    std::any::type_name::<T>()
                ),
                Some(String::from_utf8_lossy(&bytes).into_owned()),
            )
        })
    }

    /// Sends the request and decodes a JSON body that must be present.
    pub(crate) async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.json_opt().await?.ok_or_else(|| {
            Error::invalid_response("Expected a response body but got 204 No Content", None)
        })
    }

    /// Sends the request and ignores any successful body.
    pub(crate) async fn discard(self) -> Result<()> {
        self.send().await.map(drop)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};

    use super::*;

    fn base() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer key"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    #[test]
    fn test_merge_without_overrides_keeps_base() {
        let merged = merge_headers(&base(), &HeaderMap::new());
        assert_eq!(merged, base());
    }

    #[test]
    fn test_merge_overrides_take_precedence() {
        let mut overrides = HeaderMap::new();
        overrides.insert(ACCEPT, HeaderValue::from_static("text/csv"));

        let merged = merge_headers(&base(), &overrides);
        assert_eq!(merged.get(ACCEPT).unwrap(), "text/csv");
        assert_eq!(merged.get_all(ACCEPT).iter().count(), 1);
        assert_eq!(merged.get(AUTHORIZATION).unwrap(), "Bearer key");
    }

    #[test]
    fn test_merge_adds_new_headers() {
        let mut overrides = HeaderMap::new();
        overrides.insert("x-request-id", HeaderValue::from_static("abc"));

        let merged = merge_headers(&base(), &overrides);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("x-request-id").unwrap(), "abc");
    }

    #[test]
    fn test_merge_keeps_multi_valued_overrides() {
        let mut overrides = HeaderMap::new();
        overrides.append(ACCEPT, HeaderValue::from_static("text/csv"));
        overrides.append(ACCEPT, HeaderValue::from_static("text/plain"));

        let merged = merge_headers(&base(), &overrides);
        let values: Vec<_> = merged.get_all(ACCEPT).iter().collect();
        assert_eq!(values, ["text/csv", "text/plain"]);
    }
}
