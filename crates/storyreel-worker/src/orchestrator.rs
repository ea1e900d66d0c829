//! Job orchestration.
//!
//! The orchestrator owns the submission path: it validates input, creates
//! the job record, and spawns the background rendering task. The spawned
//! body is a single failure boundary — whatever happens inside it, the job
//! leaves `Processing` exactly once, to `Ready` or `Error`.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::error;

use storyreel_jobs::JobStore;
use storyreel_models::{JobId, Scene};
use storyreel_tts::TtsClient;

use crate::compositor::{Compositor, FfmpegCompositor};
use crate::config::WorkerConfig;
use crate::error::PipelineError;
use crate::logging::JobLogger;
use crate::pipeline;
use crate::renderer::{FfmpegSceneRenderer, SceneRenderer};

/// Drives jobs from submission through rendering to a terminal state.
pub struct Orchestrator {
    store: Arc<JobStore>,
    renderer: Arc<dyn SceneRenderer>,
    compositor: Arc<dyn Compositor>,
    config: WorkerConfig,
}

impl Orchestrator {
    /// Create an orchestrator with injected pipeline stages.
    pub fn new(
        store: Arc<JobStore>,
        renderer: Arc<dyn SceneRenderer>,
        compositor: Arc<dyn Compositor>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            store,
            renderer,
            compositor,
            config,
        }
    }

    /// Create an orchestrator with the FFmpeg-backed pipeline.
    pub fn with_ffmpeg(store: Arc<JobStore>, tts: TtsClient, config: WorkerConfig) -> Self {
        let renderer = Arc::new(FfmpegSceneRenderer::new(tts, config.ffmpeg_timeout_secs));
        let compositor = Arc::new(FfmpegCompositor::new(config.ffmpeg_timeout_secs));
        Self::new(store, renderer, compositor, config)
    }

    /// The job store this orchestrator writes to.
    pub fn store(&self) -> &Arc<JobStore> {
        &self.store
    }

    /// Submit scenes for asynchronous rendering.
    ///
    /// Returns the job id immediately; the pipeline runs in a background
    /// task that ends with a terminal store write.
    pub async fn submit(&self, scenes: Vec<Scene>) -> Result<JobId, PipelineError> {
        if scenes.is_empty() {
            return Err(PipelineError::NoScenes);
        }

        let id = JobId::new();
        self.store.create(&id).await?;

        let store = Arc::clone(&self.store);
        let renderer = Arc::clone(&self.renderer);
        let compositor = Arc::clone(&self.compositor);
        let config = self.config.clone();
        let job_id = id.clone();

        tokio::spawn(async move {
            let logger = JobLogger::new(&job_id);
            logger.started(scenes.len());

            let output = config.output_dir.join(format!("{}.mp4", job_id));
            let result = pipeline::run(
                renderer.as_ref(),
                compositor.as_ref(),
                &config,
                &scenes,
                &output,
                &logger,
            )
            .await;

            match result {
                Ok(artifact) => {
                    logger.completed(&artifact);
                    if let Err(e) = store.complete(&job_id, artifact).await {
                        error!(job_id = %job_id, error = %e, "Failed to record job completion");
                    }
                }
                Err(e) => {
                    logger.failed(&e);
                    if let Err(store_err) = store.fail(&job_id, e.to_string()).await {
                        error!(job_id = %job_id, error = %store_err, "Failed to record job failure");
                    }
                }
            }
        });

        Ok(id)
    }

    /// Run the same pipeline inline and return the artifact path directly.
    ///
    /// No job record is created; errors propagate to the caller. Serves the
    /// synchronous generation endpoints.
    pub async fn run_sync(
        &self,
        scenes: Vec<Scene>,
        file_stem: &str,
    ) -> Result<PathBuf, PipelineError> {
        if scenes.is_empty() {
            return Err(PipelineError::NoScenes);
        }

        let request_id = JobId::new();
        let logger = JobLogger::new(&request_id);
        logger.started(scenes.len());

        let output = self
            .config
            .output_dir
            .join(format!("{}_{}.mp4", file_stem, request_id));
        let artifact = pipeline::run(
            self.renderer.as_ref(),
            self.compositor.as_ref(),
            &self.config,
            &scenes,
            &output,
            &logger,
        )
        .await?;

        logger.completed(&artifact);
        Ok(artifact)
    }
}
