use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadTask {
    pub id: String,
    pub url: String,
    pub format: String,
    pub quality: String,
    pub status: String,
    pub created_at: String,
    pub progress: u8,
    pub download_url: Option<String>,
}

#[derive(Deserialize)]
pub struct StartDownload {
    pub url: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_quality")]
    pub quality: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub status: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiFailure {
    #[error("url must not be empty")]
    EmptyUrl,
    #[error("task {0} does not exist")]
    TaskNotFound(String),
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = match self {
            ApiFailure::EmptyUrl => StatusCode::BAD_REQUEST,
            ApiFailure::TaskNotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

fn default_format() -> String {
    "mp4".to_string()
}

fn default_quality() -> String {
    "720p".to_string()
}

pub type Db = Arc<RwLock<HashMap<String, DownloadTask>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api/v1/downloads", get(list_downloads).post(start_download))
        .route("/api/v1/downloads/{task_id}", get(get_download))
        .route("/api/v1/test-celery", post(test_celery))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_downloads(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<Vec<DownloadTask>> {
    let tasks = db.read().await;
    let mut listed: Vec<DownloadTask> = tasks
        .values()
        .filter(|task| params.status.as_ref().map_or(true, |status| &task.status == status))
        .cloned()
        .collect();
    listed.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    Json(listed)
}

async fn start_download(
    State(db): State<Db>,
    Json(input): Json<StartDownload>,
) -> Result<Json<DownloadTask>, ApiFailure> {
    if input.url.trim().is_empty() {
        return Err(ApiFailure::EmptyUrl);
    }
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    let task = DownloadTask {
        id,
        url: input.url,
        format: input.format,
        quality: input.quality,
        status: "queued".to_string(),
        created_at: chrono::Utc::now().to_rfc3339(),
        progress: 0,
        download_url: None,
    };
    tracing::info!(task_id = %task.id, url = %task.url, "download queued");
    db.write().await.insert(task.id.clone(), task.clone());
    Ok(Json(task))
}

async fn get_download(
    State(db): State<Db>,
    Path(task_id): Path<String>,
) -> Result<Json<DownloadTask>, ApiFailure> {
    let tasks = db.read().await;
    tasks
        .get(&task_id)
        .cloned()
        .map(Json)
        .ok_or(ApiFailure::TaskNotFound(task_id))
}

async fn test_celery() -> Json<serde_json::Value> {
    let task_id = Uuid::new_v4().to_string();
    tracing::info!(%task_id, "worker self-test dispatched");
    Json(json!({ "task_id": task_id, "message": "Celery test task started" }))
}
