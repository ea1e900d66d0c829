//! Per-job scratch directories.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;
use tracing::warn;

use crate::error::{MediaError, MediaResult};

/// Scratch directory holding one job's intermediate files.
///
/// Files are named by scene index, so independent scene renders never
/// collide. The directory and everything left in it are removed when the
/// workspace is dropped, whether the job succeeded or failed.
#[derive(Debug)]
pub struct JobWorkspace {
    dir: TempDir,
}

impl JobWorkspace {
    /// Create a scratch directory under `root` (system temp if `None`).
    pub fn create(root: Option<&Path>) -> MediaResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("storyreel-job-");
        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(Self { dir })
    }

    /// Path of the scratch directory itself.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Synthesized narration audio for one scene.
    pub fn narration_path(&self, index: usize) -> PathBuf {
        self.dir.path().join(format!("scene_{index}.mp3"))
    }

    /// Captioned visual track for one scene (before the audio mux).
    pub fn caption_path(&self, index: usize) -> PathBuf {
        self.dir.path().join(format!("scene_{index}_caption.mp4"))
    }

    /// Finished audio-visual clip for one scene.
    pub fn clip_path(&self, index: usize) -> PathBuf {
        self.dir.path().join(format!("scene_{index}.mp4"))
    }

    /// Concat demuxer list file.
    pub fn concat_list_path(&self) -> PathBuf {
        self.dir.path().join("concat_list.txt")
    }

    /// Path for an arbitrary scratch file.
    pub fn scratch_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Move a file from `src` to `dst`, falling back to copy-and-delete when the
/// rename crosses filesystems (EXDEV).
///
/// Used to export the assembled artifact out of the scratch directory
/// before the workspace drops.
pub async fn move_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_error(&e) => {
            fs::copy(src, dst).await?;
            if let Err(e) = fs::remove_file(src).await {
                warn!(
                    "Failed to remove source after cross-device move: {}: {}",
                    src.display(),
                    e
                );
            }
            Ok(())
        }
        Err(e) => Err(MediaError::from(e)),
    }
}

/// Check if an IO error is EXDEV (cross-device link).
fn is_cross_device_error(e: &std::io::Error) -> bool {
    // EXDEV is error code 18 on Linux/macOS
    e.raw_os_error() == Some(18)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_paths_are_unique_per_index() {
        let workspace = JobWorkspace::create(None).unwrap();

        assert_ne!(workspace.clip_path(0), workspace.clip_path(1));
        assert_ne!(workspace.clip_path(0), workspace.caption_path(0));
        assert_ne!(workspace.narration_path(0), workspace.narration_path(1));
        assert!(workspace.clip_path(3).ends_with("scene_3.mp4"));
    }

    #[test]
    fn test_workspace_directory_removed_on_drop() {
        let path = {
            let workspace = JobWorkspace::create(None).unwrap();
            std::fs::write(workspace.clip_path(0), b"clip").unwrap();
            workspace.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_move_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("source.mp4");
        let dst = dir.path().join("out").join("dest.mp4");

        fs::write(&src, b"video bytes").await.unwrap();
        move_file(&src, &dst).await.unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dst).await.unwrap(), b"video bytes");
    }

    #[test]
    fn test_is_cross_device_error() {
        assert!(is_cross_device_error(&std::io::Error::from_raw_os_error(18)));
        assert!(!is_cross_device_error(&std::io::Error::from_raw_os_error(2)));
    }
}
