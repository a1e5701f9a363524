//! Request and response hooks run by `ApiClient` around every call.
//!
//! # Design
//! The request hook may rewrite an outgoing `HttpRequest` (header injection is
//! the intended use) and currently passes it through untouched. The response
//! hook owns two jobs: flattening a successful envelope into its decoded JSON
//! body, and observing failures. A failure hook returns the error it was
//! given; it logs, it never recovers.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Hook applied to every outgoing request before it reaches the transport.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: HttpRequest) -> Result<HttpRequest, ApiError>;
}

/// Hook applied to every completed call.
pub trait ResponseInterceptor: Send + Sync {
    /// Called for 2xx responses. Returns the value the caller resolves to.
    fn on_success(&self, response: HttpResponse) -> Result<Value, ApiError> {
        unwrap_body(response)
    }

    /// Called for every failure, with or without a response.
    fn on_failure(&self, error: ApiError) -> ApiError;
}

/// Forwards requests unmodified. Reserved for bearer-token injection.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl RequestInterceptor for PassThrough {
    fn intercept(&self, request: HttpRequest) -> Result<HttpRequest, ApiError> {
        Ok(request)
    }
}

/// Log category for a failed response, keyed by status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    BadRequest,
    /// Login redirect would hook in here; not implemented.
    Unauthorized,
    NotFound,
    ServerError,
    Unknown,
}

impl ErrorCategory {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorCategory::BadRequest,
            401 => ErrorCategory::Unauthorized,
            404 => ErrorCategory::NotFound,
            500 => ErrorCategory::ServerError,
            _ => ErrorCategory::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::BadRequest => "bad request",
            ErrorCategory::Unauthorized => "unauthorized",
            ErrorCategory::NotFound => "resource not found",
            ErrorCategory::ServerError => "server error",
            ErrorCategory::Unknown => "unknown error",
        }
    }
}

/// Default response hook: unwraps bodies and logs failures by category.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorLogger;

impl ResponseInterceptor for ErrorLogger {
    fn on_failure(&self, error: ApiError) -> ApiError {
        if let Some(response) = error.response() {
            let category = ErrorCategory::from_status(response.status);
            match category {
                ErrorCategory::BadRequest => tracing::error!(
                    category = category.as_str(),
                    status = response.status,
                    body = %response.body,
                    "request rejected"
                ),
                _ => tracing::error!(
                    category = category.as_str(),
                    status = response.status,
                    "request failed"
                ),
            }
        }
        error
    }
}

/// Replace the envelope with its decoded body. An empty body decodes to null.
pub fn unwrap_body(response: HttpResponse) -> Result<Value, ApiError> {
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
