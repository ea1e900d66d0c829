//! API request and response payloads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::job::{Job, JobId, JobStatus};
use crate::scene::Scene;

/// Body of the video generation endpoints.
///
/// A missing `scenes` key is treated as an empty list so both cases fail
/// validation the same way.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, JsonSchema)]
pub struct GenerateVideoRequest {
    /// Scenes to render, in final artifact order
    #[serde(default)]
    #[validate(length(min = 1, message = "No scene data provided"))]
    pub scenes: Vec<Scene>,
}

/// Response of the asynchronous submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SubmitResponse {
    /// Identifier to poll via the status endpoint
    pub video_id: JobId,
}

/// Response of the status polling endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StatusResponse {
    pub video_id: JobId,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl StatusResponse {
    /// Build a status snapshot from a stored job record.
    pub fn from_job(job: &Job) -> Self {
        Self {
            video_id: job.id.clone(),
            status: job.status,
            error_message: job.error_message.clone(),
            created_at: job.created_at.to_rfc3339(),
            updated_at: job.updated_at.to_rfc3339(),
        }
    }
}
