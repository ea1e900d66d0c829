//! Application state.

use std::sync::Arc;

use storyreel_jobs::JobStore;
use storyreel_tts::TtsClient;
use storyreel_worker::{Orchestrator, WorkerConfig};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<JobStore>,
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Create application state with the FFmpeg-backed pipeline.
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let store = Arc::new(JobStore::new());
        let tts = TtsClient::from_env()?;
        let worker_config = WorkerConfig::from_env();
        let orchestrator = Arc::new(Orchestrator::with_ffmpeg(
            Arc::clone(&store),
            tts,
            worker_config,
        ));

        Ok(Self {
            config,
            store,
            orchestrator,
        })
    }
}
