//! Classification of HTTP failures into crate errors.

use std::fmt;

use serde::Deserialize;

use crate::error::ConectaError;

/// Error body the API sends alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// A failed API call, before conversion into `ConectaError`.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code, absent when the request never got a response
    pub status: Option<reqwest::StatusCode>,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Build from a non-2xx response body.
    ///
    /// Uses the body's `error` field when present, else `HTTP <code>`.
    pub fn from_response_body(status: reqwest::StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        Self {
            status: Some(status),
            message,
        }
    }

    /// Build from a transport failure. The message is the configured
    /// connection-failure text; reqwest's detail goes to the log only.
    pub fn from_transport(err: &reqwest::Error, connection_failure: &str) -> Self {
        tracing::warn!("request failed before a response arrived: {err}");
        Self {
            status: err.status(),
            message: connection_failure.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<ApiError> for ConectaError {
    fn from(error: ApiError) -> Self {
        match error.status {
            Some(status) => ConectaError::Server {
                status: status.as_u16(),
                message: error.message,
            },
            None => ConectaError::Network(error.message),
        }
    }
}
