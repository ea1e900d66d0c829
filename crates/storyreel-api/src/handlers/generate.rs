//! Video generation handlers.

use std::path::Path;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use tracing::info;
use validator::Validate;

use storyreel_models::{GenerateVideoRequest, SubmitResponse};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Attachment name for the synchronous generation endpoint.
const VIDEO_ATTACHMENT_NAME: &str = "story_video.mp4";

/// Attachment name for webhook-triggered generation.
const WEBHOOK_ATTACHMENT_NAME: &str = "webhook_video.mp4";

/// Synchronous generation: render inline and stream the artifact.
pub async fn generate_video(
    State(state): State<AppState>,
    Json(request): Json<GenerateVideoRequest>,
) -> Result<Response, ApiError> {
    generate_inline(state, request, "story_video", VIDEO_ATTACHMENT_NAME).await
}

/// Webhook variant of synchronous generation, with its own output filename.
pub async fn webhook(
    State(state): State<AppState>,
    Json(request): Json<GenerateVideoRequest>,
) -> Result<Response, ApiError> {
    generate_inline(state, request, "webhook_video", WEBHOOK_ATTACHMENT_NAME).await
}

/// Asynchronous generation: create a job and return its id immediately.
pub async fn generate_video_async(
    State(state): State<AppState>,
    Json(request): Json<GenerateVideoRequest>,
) -> ApiResult<(StatusCode, Json<SubmitResponse>)> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let video_id = state.orchestrator.submit(request.scenes).await?;
    info!(video_id = %video_id, "Video generation job submitted");

    Ok((StatusCode::ACCEPTED, Json(SubmitResponse { video_id })))
}

async fn generate_inline(
    state: AppState,
    request: GenerateVideoRequest,
    file_stem: &str,
    attachment: &str,
) -> Result<Response, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let scene_count = request.scenes.len();
    let artifact = state.orchestrator.run_sync(request.scenes, file_stem).await?;
    info!(scenes = scene_count, artifact = %artifact.display(), "Synchronous generation complete");

    serve_video(&artifact, attachment).await
}

/// Read an artifact from disk and stream it as an mp4 attachment.
pub(crate) async fn serve_video(path: &Path, attachment: &str) -> Result<Response, ApiError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::not_found("Video file not found")
        } else {
            ApiError::internal(format!("Failed to read video file: {e}"))
        }
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "video/mp4")
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{attachment}\""),
        )
        .body(Body::from(bytes))
        .map_err(|e| ApiError::internal(format!("Failed to build response: {e}")))
}
