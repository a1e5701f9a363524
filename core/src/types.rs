//! Domain DTOs for the download API.
//!
//! # Design
//! The client treats payloads as opaque JSON; these types mirror the
//! backend's schema for callers that want typed access. They are defined
//! independently from the mock-server crate, and the integration tests catch
//! schema drift between the two.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// Payload for starting a download. Omitted fields take the server defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

impl DownloadRequest {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            format: None,
            quality: None,
        }
    }
}

/// A download task as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DownloadTask {
    pub id: String,
    pub url: String,
    pub format: String,
    pub quality: String,
    pub status: String,
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub progress: u8,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// The backend declares `progress` optional, so `null` arrives as well as a
/// missing field; both mean no progress yet.
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    Ok(Option::<u8>::deserialize(deserializer)?.unwrap_or_default())
}

/// Acknowledgement returned by the worker self-test endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CeleryTestAck {
    pub task_id: String,
    pub message: String,
}

/// Convert a resolved body into a typed value.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
}
