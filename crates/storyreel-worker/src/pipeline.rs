//! The per-job rendering pipeline.

use std::path::{Path, PathBuf};

use storyreel_media::JobWorkspace;
use storyreel_models::Scene;

use crate::compositor::Compositor;
use crate::config::WorkerConfig;
use crate::error::PipelineError;
use crate::logging::JobLogger;
use crate::renderer::SceneRenderer;

/// Render every scene in order and assemble the final artifact.
///
/// Scenes render sequentially; the first failure short-circuits the rest.
/// Per-scene temp files live in a scratch workspace that is removed when
/// this function returns, so a failed run leaves no partial artifacts.
pub(crate) async fn run(
    renderer: &dyn SceneRenderer,
    compositor: &dyn Compositor,
    config: &WorkerConfig,
    scenes: &[Scene],
    output: &Path,
    logger: &JobLogger,
) -> Result<PathBuf, PipelineError> {
    let workspace = JobWorkspace::create(config.work_dir.as_deref())?;

    let mut clips = Vec::with_capacity(scenes.len());
    for (index, scene) in scenes.iter().enumerate() {
        logger.progress(&format!("Rendering scene {} of {}", index + 1, scenes.len()));
        let clip = renderer.render(scene, index, &workspace).await?;
        clips.push(clip);
    }

    logger.progress("Assembling final video");
    let artifact = compositor.assemble(clips, &workspace, output).await?;
    Ok(artifact)
}
