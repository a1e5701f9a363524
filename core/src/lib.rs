//! Async API client core for the video download service.
//!
//! # Overview
//! A configured HTTP client (`ApiClient`) with request and response
//! interceptors, plus a thin resource client (`DownloadApi`) mapping one
//! method to each `/api/v1/downloads` endpoint.
//!
//! # Design
//! - `ClientConfig` is fixed once the client is built; the client itself
//!   carries no mutable state, so concurrent calls need no locking.
//! - Requests are plain data (`HttpRequest`), built before any I/O. A
//!   `Transport` executes them; `ReqwestTransport` is the production one.
//! - Successful calls resolve to the decoded JSON body, never the envelope.
//!   Failures are logged by status category and returned unchanged.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod downloads;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod transport;
pub mod types;

#[cfg(test)]
extern crate self as downloader_core;

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
pub(crate) mod test_support;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use downloads::{download_api, DownloadApi};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, QueryParams};
pub use interceptor::{ErrorCategory, ErrorLogger, PassThrough, RequestInterceptor, ResponseInterceptor};
pub use transport::{ReqwestTransport, Transport};
pub use types::{CeleryTestAck, DownloadRequest, DownloadTask};
