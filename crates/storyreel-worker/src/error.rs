//! Worker error types.

use thiserror::Error;

use storyreel_jobs::StoreError;
use storyreel_media::MediaError;
use storyreel_tts::TtsError;

pub type WorkerResult<T> = Result<T, PipelineError>;

/// Failure of a single scene render.
///
/// Scene numbers are one-based, matching how callers count scenes in their
/// submission.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Speech synthesis failed for scene {scene}: {source}")]
    Tts {
        scene: usize,
        #[source]
        source: TtsError,
    },

    #[error("Clip rendering failed for scene {scene}: {source}")]
    Media {
        scene: usize,
        #[source]
        source: MediaError,
    },

    #[error("IO error for scene {scene}: {source}")]
    Io {
        scene: usize,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Build from the zero-based index of the failing scene.
    pub fn tts(index: usize, source: TtsError) -> Self {
        Self::Tts {
            scene: index + 1,
            source,
        }
    }

    /// Build from the zero-based index of the failing scene.
    pub fn media(index: usize, source: MediaError) -> Self {
        Self::Media {
            scene: index + 1,
            source,
        }
    }

    /// Build from the zero-based index of the failing scene.
    pub fn io(index: usize, source: std::io::Error) -> Self {
        Self::Io {
            scene: index + 1,
            source,
        }
    }

    /// One-based position of the failing scene.
    pub fn scene(&self) -> usize {
        match self {
            RenderError::Tts { scene, .. }
            | RenderError::Media { scene, .. }
            | RenderError::Io { scene, .. } => *scene,
        }
    }
}

/// Failure while concatenating rendered clips into the final artifact.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("Concatenation failed: {0}")]
    Media(#[from] MediaError),

    #[error("No rendered clips to assemble")]
    NoClips,
}

/// Any failure of a job pipeline.
///
/// Caught at the background-task boundary and converted into a terminal
/// `Error` job state; on the synchronous path it propagates to the caller.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No scene data provided")]
    NoScenes,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("Job store error: {0}")]
    Store(#[from] StoreError),

    #[error("Workspace error: {0}")]
    Workspace(#[from] MediaError),
}
