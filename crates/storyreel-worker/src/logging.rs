//! Structured job lifecycle logging.

use std::fmt;
use std::path::Path;

use tracing::{error, info};

use storyreel_models::JobId;

/// Logger attaching the job id to every lifecycle event.
#[derive(Debug, Clone)]
pub struct JobLogger {
    job_id: String,
}

impl JobLogger {
    /// Create a logger for one job.
    pub fn new(job_id: &JobId) -> Self {
        Self {
            job_id: job_id.to_string(),
        }
    }

    /// Log the start of a pipeline run.
    pub fn started(&self, scene_count: usize) {
        info!(job_id = %self.job_id, scene_count, "Job started");
    }

    /// Log a progress update during the run.
    pub fn progress(&self, message: &str) {
        info!(job_id = %self.job_id, "Job progress: {}", message);
    }

    /// Log successful completion with the artifact location.
    pub fn completed(&self, artifact: &Path) {
        info!(job_id = %self.job_id, artifact = %artifact.display(), "Job completed");
    }

    /// Log a terminal failure.
    pub fn failed(&self, cause: &impl fmt::Display) {
        error!(job_id = %self.job_id, "Job failed: {}", cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_logger_carries_the_id() {
        let id = JobId::from_string("job-123");
        let logger = JobLogger::new(&id);
        assert_eq!(logger.job_id, "job-123");
    }
}
