//! Error types for the download API client.
//!
//! # Design
//! The split that matters to callers is whether the server answered at all.
//! `Http` carries the full response envelope so the caller can inspect the
//! status and body. `Transport` and `Timeout` mean no response was received.
//! The interceptor logs `Http` failures by status and leaves the others alone.

use crate::http::HttpResponse;

/// Errors returned by `ApiClient` and `DownloadApi` calls.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {}: {}", .0.status, .0.body)]
    Http(HttpResponse),

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// No response arrived within the client timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A successful response body was not valid JSON, or did not match the
    /// requested type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// The response attached to this error, if the server answered.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            ApiError::Http(response) => Some(response),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response().map(|response| response.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
