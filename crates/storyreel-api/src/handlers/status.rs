//! Job status polling and artifact download handlers.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;

use storyreel_models::{JobId, JobStatus, StatusResponse};

use crate::error::{ApiError, ApiResult};
use crate::handlers::generate::serve_video;
use crate::state::AppState;

/// Attachment name for the download endpoint.
const DOWNLOAD_ATTACHMENT_NAME: &str = "story_video.mp4";

/// Poll the status of an asynchronous job.
pub async fn video_status(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> ApiResult<Json<StatusResponse>> {
    let id = JobId::from_string(video_id);
    let job = state.store.get(&id).await?;
    Ok(Json(StatusResponse::from_job(&job)))
}

/// Download the artifact of a `Ready` job.
pub async fn download_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = JobId::from_string(video_id);
    let job = state.store.get(&id).await?;

    match job.status {
        JobStatus::Ready => {
            let artifact = job
                .artifact_path
                .ok_or_else(|| ApiError::internal("Ready job has no artifact path"))?;
            serve_video(&artifact, DOWNLOAD_ATTACHMENT_NAME).await
        }
        status => Err(ApiError::bad_request(format!(
            "Video is not ready: status is {status}"
        ))),
    }
}
