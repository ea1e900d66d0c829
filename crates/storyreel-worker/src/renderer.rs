//! Per-scene rendering.

use async_trait::async_trait;
use tracing::{debug, info};

use storyreel_media::{caption, mux, probe, FfmpegRunner, JobWorkspace, SCENE_DURATION_SECS};
use storyreel_models::{RenderedClip, Scene};
use storyreel_tts::TtsClient;

use crate::error::RenderError;

/// Renders one scene into a single audio-visual clip.
///
/// Scene renders are independent; the only coordination between them is the
/// per-index file naming inside the job workspace.
#[async_trait]
pub trait SceneRenderer: Send + Sync {
    async fn render(
        &self,
        scene: &Scene,
        index: usize,
        workspace: &JobWorkspace,
    ) -> Result<RenderedClip, RenderError>;
}

/// FFmpeg-backed renderer: synthesized narration muxed onto a fixed-duration
/// captioned frame.
pub struct FfmpegSceneRenderer {
    tts: TtsClient,
    runner: FfmpegRunner,
}

impl FfmpegSceneRenderer {
    /// Create a renderer driving FFmpeg with the given per-invocation timeout.
    pub fn new(tts: TtsClient, ffmpeg_timeout_secs: u64) -> Self {
        Self {
            tts,
            runner: FfmpegRunner::new().with_timeout(ffmpeg_timeout_secs),
        }
    }
}

#[async_trait]
impl SceneRenderer for FfmpegSceneRenderer {
    async fn render(
        &self,
        scene: &Scene,
        index: usize,
        workspace: &JobWorkspace,
    ) -> Result<RenderedClip, RenderError> {
        // Narration audio
        let audio = self
            .tts
            .synthesize(&scene.narration)
            .await
            .map_err(|source| RenderError::tts(index, source))?;
        let audio_path = workspace.narration_path(index);
        tokio::fs::write(&audio_path, &audio)
            .await
            .map_err(|source| RenderError::io(index, source))?;

        // Captioned visual track
        let caption_path = workspace.caption_path(index);
        caption::render_caption_clip(&self.runner, &scene.description, &caption_path)
            .await
            .map_err(|source| RenderError::media(index, source))?;

        // The mux pins every clip to the fixed scene duration; surface the
        // trim when narration runs longer.
        if let Ok(audio_secs) = probe::probe_duration(&audio_path).await {
            if audio_secs > SCENE_DURATION_SECS {
                debug!(
                    index,
                    audio_secs, "Narration exceeds scene duration, audio will be truncated"
                );
            }
        }

        let clip_path = workspace.clip_path(index);
        mux::mux_audio(&self.runner, &caption_path, &audio_path, &clip_path)
            .await
            .map_err(|source| RenderError::media(index, source))?;

        info!(index, clip = %clip_path.display(), "Scene rendered");
        Ok(RenderedClip::new(index, clip_path))
    }
}
