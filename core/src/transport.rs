//! The I/O seam between `ApiClient` and the network.
//!
//! # Design
//! `ApiClient` never talks to the network itself. It hands a fully built
//! `HttpRequest` plus the absolute URL to a `Transport` and gets an
//! `HttpResponse` envelope back. Non-2xx statuses are returned as data here;
//! classifying them is the client's job. Only failures where no response was
//! received come back as `Err`.

use async_trait::async_trait;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request` against `url` (base URL plus `request.path`).
    async fn execute(&self, url: &str, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Production transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport that applies the config timeout to every request.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

fn no_response(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

/// Flatten a header map. Non-UTF-8 values are decoded lossily, not dropped.
fn header_pairs(headers: &reqwest::header::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, url: &str, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self.client.request(request.method.into(), url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(no_response)?;
        let status = response.status().as_u16();
        let headers = header_pairs(response.headers());
        let body = response.text().await.map_err(no_response)?;

        Ok(HttpResponse { status, headers, body })
    }
}
