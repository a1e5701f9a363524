//! Fixtures shared by the unit tests and the integration suites.
//!
//! The library mounts this file as its `test_support` module; it names
//! everything through `downloader_core::` so it reads the same from both.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use downloader_core::{ApiError, HttpRequest, HttpResponse, Transport};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Replays canned results in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    seen: Mutex<Vec<(String, HttpRequest)>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<HttpResponse, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<(String, HttpRequest)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, url: &str, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.seen
            .lock()
            .unwrap()
            .push((url.to_string(), request.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_string())))
    }
}

pub fn json_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: body.to_string(),
    }
}

/// Collects the `category` field of every log event on the current thread.
#[derive(Clone, Default)]
pub struct CategoryCapture(Arc<Mutex<Vec<String>>>);

impl CategoryCapture {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        tracing::subscriber::set_default(tracing_subscriber::registry().with(self.clone()))
    }

    pub fn categories(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for CategoryCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = CategoryVisitor(None);
        event.record(&mut visitor);
        if let Some(category) = visitor.0 {
            self.0.lock().unwrap().push(category);
        }
    }
}

struct CategoryVisitor(Option<String>);

impl Visit for CategoryVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "category" {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "category" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

/// Run `f` with a capture installed and return its output plus the categories.
pub fn capture_categories<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    let capture = CategoryCapture::default();
    let output = {
        let _guard = capture.install();
        f()
    };
    (output, capture.categories())
}
