use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, DownloadTask};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_downloads_empty() {
    let resp = app().oneshot(get_request("/api/v1/downloads")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Vec<DownloadTask> = body_json(resp).await;
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn list_downloads_ignores_unknown_params() {
    let resp = app()
        .oneshot(get_request("/api/v1/downloads?page=2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// --- start ---

#[tokio::test]
async fn start_download_queues_task() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/v1/downloads",
            r#"{"url":"https://youtu.be/abc"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let task: DownloadTask = body_json(resp).await;
    assert_eq!(task.id.len(), 8);
    assert_eq!(task.url, "https://youtu.be/abc");
    assert_eq!(task.format, "mp4");
    assert_eq!(task.quality, "720p");
    assert_eq!(task.status, "queued");
    assert_eq!(task.progress, 0);
}

#[tokio::test]
async fn start_download_empty_url_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/api/v1/downloads", r#"{"url":"  "}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["detail"], "url must not be empty");
}

#[tokio::test]
async fn start_download_missing_url_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/v1/downloads", r#"{"format":"mp3"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_download_not_found() {
    let resp = app()
        .oneshot(get_request("/api/v1/downloads/deadbeef"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["detail"], "task deadbeef does not exist");
}

#[tokio::test]
async fn get_download_nested_path_has_no_route() {
    let resp = app()
        .oneshot(get_request("/api/v1/downloads/a/b"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- worker self-test ---

#[tokio::test]
async fn test_celery_acknowledges() {
    let resp = app()
        .oneshot(Request::builder().method("POST").uri("/api/v1/test-celery").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["task_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["message"], "Celery test task started");
}

#[tokio::test]
async fn test_celery_rejects_get() {
    let resp = app().oneshot(get_request("/api/v1/test-celery")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- full lifecycle ---

#[tokio::test]
async fn download_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // start
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/api/v1/downloads",
            r#"{"url":"https://youtu.be/one","format":"mp3","quality":"best"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created: DownloadTask = body_json(resp).await;
    assert_eq!(created.format, "mp3");
    let id = created.id.clone();

    // list, should contain the one task
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/v1/downloads"))
        .await
        .unwrap();
    let tasks: Vec<DownloadTask> = body_json(resp).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);

    // list filtered by a status nothing has
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/v1/downloads?status=completed"))
        .await
        .unwrap();
    let tasks: Vec<DownloadTask> = body_json(resp).await;
    assert!(tasks.is_empty());

    // list filtered by the queued status
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/v1/downloads?status=queued"))
        .await
        .unwrap();
    let tasks: Vec<DownloadTask> = body_json(resp).await;
    assert_eq!(tasks.len(), 1);

    // get
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/api/v1/downloads/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: DownloadTask = body_json(resp).await;
    assert_eq!(fetched.id, id);
    assert_eq!(fetched.url, "https://youtu.be/one");
}
