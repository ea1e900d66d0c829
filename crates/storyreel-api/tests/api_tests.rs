//! API integration tests.
//!
//! The FFmpeg/TTS pipeline stages are replaced with marker-file doubles so
//! the full HTTP surface can be exercised without external tools.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use storyreel_api::{create_router, ApiConfig, AppState};
use storyreel_jobs::JobStore;
use storyreel_media::JobWorkspace;
use storyreel_models::{RenderedClip, Scene};
use storyreel_tts::TtsError;
use storyreel_worker::{
    order_clips, AssemblyError, Compositor, Orchestrator, RenderError, SceneRenderer, WorkerConfig,
};

/// Renderer double: writes one marker file per scene.
struct MarkerRenderer {
    fail_at: Option<usize>,
    delay: Duration,
}

#[async_trait]
impl SceneRenderer for MarkerRenderer {
    async fn render(
        &self,
        scene: &Scene,
        index: usize,
        workspace: &JobWorkspace,
    ) -> Result<RenderedClip, RenderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail_at == Some(index) {
            return Err(RenderError::tts(
                index,
                TtsError::Status {
                    status: 500,
                    body: "synth backend down".to_string(),
                },
            ));
        }
        let path = workspace.clip_path(index);
        tokio::fs::write(&path, format!("segment {}:{}\n", index, scene.description))
            .await
            .map_err(|source| RenderError::io(index, source))?;
        Ok(RenderedClip::new(index, path))
    }
}

/// Compositor double: concatenates marker files in scene order.
struct MarkerCompositor;

#[async_trait]
impl Compositor for MarkerCompositor {
    async fn assemble(
        &self,
        clips: Vec<RenderedClip>,
        _workspace: &JobWorkspace,
        output: &Path,
    ) -> Result<PathBuf, AssemblyError> {
        if clips.is_empty() {
            return Err(AssemblyError::NoClips);
        }
        let mut content = String::new();
        for clip in order_clips(clips) {
            let segment = tokio::fs::read_to_string(&clip.path)
                .await
                .map_err(|e| AssemblyError::Media(e.into()))?;
            content.push_str(&segment);
        }
        tokio::fs::write(output, content)
            .await
            .map_err(|e| AssemblyError::Media(e.into()))?;
        Ok(output.to_path_buf())
    }
}

fn test_app(output_dir: &Path, fail_at: Option<usize>, delay: Duration) -> (Router, AppState) {
    let store = Arc::new(JobStore::new());
    let config = WorkerConfig {
        work_dir: None,
        output_dir: output_dir.to_path_buf(),
        ffmpeg_timeout_secs: 5,
    };
    let orchestrator = Arc::new(Orchestrator::new(
        Arc::clone(&store),
        Arc::new(MarkerRenderer { fail_at, delay }),
        Arc::new(MarkerCompositor),
        config,
    ));
    let state = AppState {
        config: ApiConfig::default(),
        store,
        orchestrator,
    };
    (create_router(state.clone()), state)
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn scenes_body() -> serde_json::Value {
    serde_json::json!({
        "scenes": [
            { "scene_description": "A", "narration": "hello" },
            { "scene_description": "B", "narration": "world" },
        ]
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn poll_status(app: &Router, video_id: &str) -> serde_json::Value {
    for _ in 0..500 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/video_status/{video_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let status = body_json(response).await;
        if status["status"] != "processing" {
            return status;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("job never left processing");
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path(), None, Duration::ZERO);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_scenes_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (app, state) = test_app(dir.path(), None, Duration::ZERO);

    let response = app
        .clone()
        .oneshot(json_request(
            "/generate_video_async",
            serde_json::json!({ "scenes": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("No scene data"));

    // No job was created.
    assert!(state.store.is_empty().await);
}

#[tokio::test]
async fn test_missing_scenes_key_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path(), None, Duration::ZERO);

    let response = app
        .oneshot(json_request("/generate_video", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_video_id_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path(), None, Duration::ZERO);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/video_status/no-such-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/download_video/no-such-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_async_flow_submit_poll_download() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path(), None, Duration::ZERO);

    // Submit
    let response = app
        .clone()
        .oneshot(json_request("/generate_video_async", scenes_body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let submit = body_json(response).await;
    let video_id = submit["video_id"].as_str().unwrap().to_string();

    // Poll until terminal
    let status = poll_status(&app, &video_id).await;
    assert_eq!(status["status"], "ready");
    assert_eq!(status["video_id"], video_id.as_str());

    // Download: two segments, original order
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/download_video/{video_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "video/mp4"
    );
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("attachment"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"segment 0:A\nsegment 1:B\n");
}

#[tokio::test]
async fn test_download_before_ready_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path(), None, Duration::from_secs(2));

    let response = app
        .clone()
        .oneshot(json_request("/generate_video_async", scenes_body()))
        .await
        .unwrap();
    let submit = body_json(response).await;
    let video_id = submit["video_id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/download_video/{video_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("processing"));
}

#[tokio::test]
async fn test_failing_scene_surfaces_in_status() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path(), Some(1), Duration::ZERO);

    let response = app
        .clone()
        .oneshot(json_request("/generate_video_async", scenes_body()))
        .await
        .unwrap();
    let submit = body_json(response).await;
    let video_id = submit["video_id"].as_str().unwrap().to_string();

    let status = poll_status(&app, &video_id).await;
    assert_eq!(status["status"], "error");
    assert!(status["error_message"]
        .as_str()
        .unwrap()
        .contains("scene 2"));

    // A failed job has no downloadable artifact.
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/download_video/{video_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_sync_generation_streams_the_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path(), None, Duration::ZERO);

    let response = app
        .oneshot(json_request("/generate_video", scenes_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("story_video.mp4"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"segment 0:A\nsegment 1:B\n");
}

#[tokio::test]
async fn test_webhook_uses_its_own_attachment_name() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path(), None, Duration::ZERO);

    let response = app
        .oneshot(json_request("/webhook", scenes_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("webhook_video.mp4"));
}

#[tokio::test]
async fn test_sync_generation_failure_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let (app, _) = test_app(dir.path(), Some(0), Duration::ZERO);

    let response = app
        .oneshot(json_request("/generate_video", scenes_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("scene 1"));
}
