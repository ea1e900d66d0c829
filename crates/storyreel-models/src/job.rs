//! Job identity and lifecycle state.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Unique identifier for a video generation job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a job.
///
/// Transitions are monotonic: `Processing` moves to exactly one of the
/// terminal states and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job is rendering in the background
    #[default]
    Processing,
    /// Final artifact is available for download
    Ready,
    /// Pipeline failed; `error_message` carries the cause
    Error,
}

impl JobStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Processing => "processing",
            JobStatus::Ready => "ready",
            JobStatus::Error => "error",
        }
    }

    /// Check if this is a terminal state (no more transitions occur).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Ready | JobStatus::Error)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tracked asynchronous video generation request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Job {
    /// Unique job ID
    pub id: JobId,

    /// Current lifecycle status
    pub status: JobStatus,

    /// Final artifact location, set only once the job is `Ready`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_path: Option<PathBuf>,

    /// Failure cause, set only once the job is `Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// When the job was submitted
    pub created_at: DateTime<Utc>,

    /// When the status last changed
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Create a new job record in `Processing` state.
    pub fn new(id: JobId) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: JobStatus::Processing,
            artifact_path: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Mark the job ready with its artifact location.
    ///
    /// Payload and status are set together so a record cloned out of the
    /// store is never observed with one but not the other.
    pub fn complete(&mut self, artifact_path: impl Into<PathBuf>) {
        self.artifact_path = Some(artifact_path.into());
        self.status = JobStatus::Ready;
        self.updated_at = Utc::now();
    }

    /// Mark the job failed with a human-readable message.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
        self.status = JobStatus::Error;
        self.updated_at = Utc::now();
    }
}
