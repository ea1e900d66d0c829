//! Final artifact assembly.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use storyreel_media::{concat, workspace, FfmpegRunner, JobWorkspace};
use storyreel_models::RenderedClip;

use crate::error::AssemblyError;

/// Scratch filename for the assembled artifact before export.
const ASSEMBLY_SCRATCH_NAME: &str = "final_output.mp4";

/// Concatenates an ordered sequence of rendered clips into one artifact.
#[async_trait]
pub trait Compositor: Send + Sync {
    /// Assemble `clips` into a single video at `output`.
    ///
    /// Clips are reordered to scene-index order before concatenation, so
    /// rendering completion order never affects the artifact.
    async fn assemble(
        &self,
        clips: Vec<RenderedClip>,
        workspace: &JobWorkspace,
        output: &Path,
    ) -> Result<PathBuf, AssemblyError>;
}

/// Restore original scene order, whatever order rendering finished in.
pub fn order_clips(mut clips: Vec<RenderedClip>) -> Vec<RenderedClip> {
    clips.sort_by_key(|c| c.index);
    clips
}

/// FFmpeg-backed compositor using the concat demuxer.
pub struct FfmpegCompositor {
    runner: FfmpegRunner,
}

impl FfmpegCompositor {
    /// Create a compositor driving FFmpeg with the given timeout.
    pub fn new(ffmpeg_timeout_secs: u64) -> Self {
        Self {
            runner: FfmpegRunner::new().with_timeout(ffmpeg_timeout_secs),
        }
    }
}

#[async_trait]
impl Compositor for FfmpegCompositor {
    async fn assemble(
        &self,
        clips: Vec<RenderedClip>,
        workspace: &JobWorkspace,
        output: &Path,
    ) -> Result<PathBuf, AssemblyError> {
        if clips.is_empty() {
            return Err(AssemblyError::NoClips);
        }

        let clips = order_clips(clips);
        let paths: Vec<PathBuf> = clips.into_iter().map(|c| c.path).collect();

        // Assemble inside the scratch dir, then export so the artifact
        // survives workspace teardown.
        let scratch_output = workspace.scratch_path(ASSEMBLY_SCRATCH_NAME);
        concat::concat_clips(
            &self.runner,
            &paths,
            &workspace.concat_list_path(),
            &scratch_output,
        )
        .await?;
        workspace::move_file(&scratch_output, output).await?;

        info!(
            segments = paths.len(),
            artifact = %output.display(),
            "Final video assembled"
        );
        Ok(output.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clips_restores_scene_order() {
        let clips = vec![
            RenderedClip::new(2, "/tmp/scene_2.mp4"),
            RenderedClip::new(0, "/tmp/scene_0.mp4"),
            RenderedClip::new(1, "/tmp/scene_1.mp4"),
        ];

        let ordered = order_clips(clips);
        let indices: Vec<usize> = ordered.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_assemble_rejects_empty_input() {
        let compositor = FfmpegCompositor::new(5);
        let workspace = JobWorkspace::create(None).unwrap();
        let err = compositor
            .assemble(Vec::new(), &workspace, Path::new("/tmp/out.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, AssemblyError::NoClips));
    }
}
