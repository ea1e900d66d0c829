//! Scene rendering pipeline and job orchestration.
//!
//! This crate provides:
//! - Per-scene rendering: synthesized narration muxed onto a captioned frame
//! - Ordered assembly of rendered clips into the final artifact
//! - The supervised background pipeline whose only exit is a terminal
//!   job-store write

pub mod compositor;
pub mod config;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod renderer;

mod pipeline;

pub use compositor::{order_clips, Compositor, FfmpegCompositor};
pub use config::WorkerConfig;
pub use error::{AssemblyError, PipelineError, RenderError, WorkerResult};
pub use logging::JobLogger;
pub use orchestrator::Orchestrator;
pub use renderer::{FfmpegSceneRenderer, SceneRenderer};
