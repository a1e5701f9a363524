//! Resource client for the `/api/v1/downloads` endpoints.
//!
//! Each operation is one HTTP call with no added logic: no validation, no
//! retries, no timeout override. The `build_*` methods expose the request an
//! operation would send, without sending it.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, QueryParams};

pub const DOWNLOADS_PATH: &str = "/api/v1/downloads";
pub const TEST_CELERY_PATH: &str = "/api/v1/test-celery";

#[derive(Debug, Clone)]
pub struct DownloadApi {
    client: ApiClient,
}

impl DownloadApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn build_start_download<B>(&self, data: &B) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.client
            .build_request(HttpMethod::Post, DOWNLOADS_PATH, &QueryParams::new(), Some(data))
    }

    pub fn build_get_downloads(&self, params: &QueryParams) -> Result<HttpRequest, ApiError> {
        self.client
            .build_request::<()>(HttpMethod::Get, DOWNLOADS_PATH, params, None)
    }

    /// `task_id` is substituted verbatim; slashes and spaces are not escaped.
    pub fn build_get_download(&self, task_id: &str) -> Result<HttpRequest, ApiError> {
        let path = format!("{DOWNLOADS_PATH}/{task_id}");
        self.client
            .build_request::<()>(HttpMethod::Get, &path, &QueryParams::new(), None)
    }

    pub fn build_test_celery(&self) -> Result<HttpRequest, ApiError> {
        self.client
            .build_request::<()>(HttpMethod::Post, TEST_CELERY_PATH, &QueryParams::new(), None)
    }

    pub async fn start_download<B>(&self, data: &B) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_start_download(data)?;
        self.client.send(request).await
    }

    pub async fn get_downloads(&self, params: &QueryParams) -> Result<Value, ApiError> {
        let request = self.build_get_downloads(params)?;
        self.client.send(request).await
    }

    pub async fn get_download(&self, task_id: &str) -> Result<Value, ApiError> {
        let request = self.build_get_download(task_id)?;
        self.client.send(request).await
    }

    pub async fn test_celery(&self) -> Result<Value, ApiError> {
        let request = self.build_test_celery()?;
        self.client.send(request).await
    }
}

static SHARED: OnceLock<DownloadApi> = OnceLock::new();

/// Process-wide instance, configured from the environment on first use.
pub fn download_api() -> Result<&'static DownloadApi, ApiError> {
    if let Some(api) = SHARED.get() {
        return Ok(api);
    }
    let api = DownloadApi::new(ApiClient::new(ClientConfig::from_env())?);
    Ok(SHARED.get_or_init(|| api))
}
