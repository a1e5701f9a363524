//! Client configuration: base URL, timeout and default headers.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "DOWNLOADER_API_URL";

/// Settings an `ApiClient` is constructed with.
///
/// Fields are read-only once built; the `with_*` methods consume the config,
/// so nothing can change it after it is handed to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }

    /// Read the base URL override from `DOWNLOADER_API_URL`.
    pub fn from_env() -> Self {
        Self::from_override(std::env::var(BASE_URL_ENV).ok().as_deref())
    }

    /// Use `base_url` when it is present and non-empty, else the default.
    pub fn from_override(base_url: Option<&str>) -> Self {
        match base_url {
            Some(url) if !url.is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a default header, replacing any existing one with the same name.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers
            .retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.default_headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
