//! Worker configuration.

use std::path::PathBuf;

/// Configuration for the rendering pipeline.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Root for per-job scratch workspaces (system temp if `None`)
    pub work_dir: Option<PathBuf>,
    /// Directory where final artifacts are written
    pub output_dir: PathBuf,
    /// Timeout for individual FFmpeg invocations
    pub ffmpeg_timeout_secs: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            work_dir: None,
            output_dir: std::env::temp_dir(),
            ffmpeg_timeout_secs: 120,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").ok().map(PathBuf::from),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            ffmpeg_timeout_secs: std::env::var("FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(120),
        }
    }
}
