//! Configured HTTP client with request and response interceptors.
//!
//! # Design
//! `ApiClient` holds an immutable `ClientConfig`, a `Transport` and the two
//! interceptors, all behind `Arc`, so clones are cheap and calls share no
//! mutable state. Building a request (`build_request`) is separate from
//! sending it (`send`), so callers and tests can inspect the exact request
//! before any I/O happens.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, QueryParams};
use crate::interceptor::{ErrorLogger, PassThrough, RequestInterceptor, ResponseInterceptor};
use crate::transport::{ReqwestTransport, Transport};

#[derive(Clone)]
pub struct ApiClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    request_interceptor: Arc<dyn RequestInterceptor>,
    response_interceptor: Arc<dyn ResponseInterceptor>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Client backed by `reqwest`, with the default interceptors.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            request_interceptor: Arc::new(PassThrough),
            response_interceptor: Arc::new(ErrorLogger),
        }
    }

    pub fn with_request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptor = Arc::new(interceptor);
        self
    }

    pub fn with_response_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.response_interceptor = Arc::new(interceptor);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// Absolute URL for `path`. Plain concatenation, nothing is escaped.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url())
    }

    /// Build a request carrying the default headers, without sending it.
    pub fn build_request<B>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &QueryParams,
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: path.to_string(),
            query: query.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            headers: self.config.default_headers().to_vec(),
            body,
        })
    }

    /// Run `request` through the interceptors and the transport.
    ///
    /// Resolves to the decoded response body. Every failure passes through
    /// the response interceptor's `on_failure` before it is returned.
    pub async fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        let request = match self.request_interceptor.intercept(request) {
            Ok(request) => request,
            Err(err) => return Err(self.response_interceptor.on_failure(err)),
        };
        let url = self.url_for(&request.path);
        tracing::debug!(method = %request.method, %url, "sending request");

        match self.transport.execute(&url, &request).await {
            Ok(response) if response.is_success() => self.response_interceptor.on_success(response),
            Ok(response) => Err(self.response_interceptor.on_failure(ApiError::Http(response))),
            Err(err) => Err(self.response_interceptor.on_failure(err)),
        }
    }

    pub async fn get(&self, path: &str, query: &QueryParams) -> Result<Value, ApiError> {
        let request = self.build_request::<()>(HttpMethod::Get, path, query, None)?;
        self.send(request).await
    }

    pub async fn post<B>(&self, path: &str, body: Option<&B>) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_request(HttpMethod::Post, path, &QueryParams::new(), body)?;
        self.send(request).await
    }

    pub async fn put<B>(&self, path: &str, body: Option<&B>) -> Result<Value, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_request(HttpMethod::Put, path, &QueryParams::new(), body)?;
        self.send(request).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let request = self.build_request::<()>(HttpMethod::Delete, path, &QueryParams::new(), None)?;
        self.send(request).await
    }
}
