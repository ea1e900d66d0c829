//! Process-scoped job registry.
//!
//! The store is the only state shared between request handlers and the
//! background rendering tasks. Every operation holds the lock for the whole
//! read or mutation, so callers never observe a half-updated record.

use std::collections::HashMap;
use std::path::PathBuf;

use tokio::sync::RwLock;
use tracing::{debug, info};

use storyreel_models::{Job, JobId};

use crate::error::{StoreError, StoreResult};

/// In-memory registry of video generation jobs.
///
/// Entries persist for the lifetime of the process; there is no eviction.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl JobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new job record in `Processing` state.
    pub async fn create(&self, id: &JobId) -> StoreResult<()> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(id) {
            return Err(StoreError::DuplicateJob(id.clone()));
        }
        jobs.insert(id.clone(), Job::new(id.clone()));
        debug!(job_id = %id, "Job record created");
        Ok(())
    }

    /// Get a snapshot of a job record.
    pub async fn get(&self, id: &JobId) -> StoreResult<Job> {
        let jobs = self.jobs.read().await;
        jobs.get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Transition a job to `Ready` with its artifact location.
    pub async fn complete(&self, id: &JobId, artifact_path: impl Into<PathBuf>) -> StoreResult<()> {
        let mut jobs = self.jobs.write().await;
        let job = transitionable(&mut jobs, id)?;
        job.complete(artifact_path);
        info!(job_id = %id, "Job ready");
        Ok(())
    }

    /// Transition a job to `Error` with a human-readable message.
    pub async fn fail(&self, id: &JobId, message: impl Into<String>) -> StoreResult<()> {
        let mut jobs = self.jobs.write().await;
        let job = transitionable(&mut jobs, id)?;
        job.fail(message);
        info!(job_id = %id, "Job failed");
        Ok(())
    }

    /// Number of tracked jobs.
    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }

    /// Check whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.jobs.read().await.is_empty()
    }
}

/// Look up a job that is still allowed to transition.
fn transitionable<'a>(
    jobs: &'a mut HashMap<JobId, Job>,
    id: &JobId,
) -> StoreResult<&'a mut Job> {
    let job = jobs
        .get_mut(id)
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;
    if job.status.is_terminal() {
        return Err(StoreError::InvalidTransition {
            id: id.clone(),
            status: job.status,
        });
    }
    Ok(job)
}
