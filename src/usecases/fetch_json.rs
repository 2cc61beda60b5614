//! JSON request wrapper whose failures are both toasted and returned.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::domain::{
    notice::ToastKind,
    request::{HttpRequest, RequestOptions},
};

use super::contracts::{HttpTransport, ToastSink};

const CONTENT_TYPE: &str = "Content-Type";
const JSON_MEDIA_TYPE: &str = "application/json";
const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Non-2xx status; the message comes from the body's `error` field.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Transport(String),
    #[error("invalid JSON response: {0}")]
    InvalidJson(String),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Default `Content-Type: application/json`, overridden by a caller header of
/// the same name (compared case-insensitively).
pub fn merge_headers(caller: &BTreeMap<String, String>) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(caller.len() + 1);

    if !caller
        .keys()
        .any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE))
    {
        headers.push((CONTENT_TYPE.to_owned(), JSON_MEDIA_TYPE.to_owned()));
    }

    headers.extend(
        caller
            .iter()
            .map(|(name, value)| (name.clone(), value.clone())),
    );
    headers
}

/// Sends `options` to `url` and parses the JSON response.
///
/// An empty 2xx body yields `Value::Null`. A browser `response.json()` would
/// reject that body and toast an error; here it counts as success.
pub fn fetch_json(
    transport: &dyn HttpTransport,
    toasts: &mut dyn ToastSink,
    url: &str,
    options: &RequestOptions,
) -> Result<Value, FetchError> {
    let result = execute(transport, url, options);

    if let Err(error) = &result {
        tracing::debug!(url, error = %error, "json request failed");
        toasts.show_toast(&error.to_string(), ToastKind::Error);
    }

    result
}

fn execute(
    transport: &dyn HttpTransport,
    url: &str,
    options: &RequestOptions,
) -> Result<Value, FetchError> {
    let request = HttpRequest {
        method: options.method,
        url: url.to_owned(),
        headers: merge_headers(&options.headers),
        body: options.body.clone(),
    };

    let response = transport
        .execute(&request)
        .map_err(|error| FetchError::Transport(error.to_string()))?;

    if !response.is_success() {
        return Err(FetchError::Status {
            status: response.status,
            message: error_message(&response.body),
        });
    }

    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&response.body).map_err(|error| FetchError::InvalidJson(error.to_string()))
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_owned())
}
