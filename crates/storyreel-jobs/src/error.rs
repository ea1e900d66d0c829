//! Job store error types.

use storyreel_models::{JobId, JobStatus};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Job already exists: {0}")]
    DuplicateJob(JobId),

    #[error("Job not found: {0}")]
    NotFound(JobId),

    #[error("Invalid transition for job {id}: already {status}")]
    InvalidTransition { id: JobId, status: JobStatus },
}
