//! Ordered clip concatenation.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::caption::FRAME_RATE;
use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Build the concat-demuxer list file content for `paths`, in order.
///
/// Single quotes inside a path are closed, escaped, and reopened, per the
/// demuxer's quoting rules.
pub fn build_concat_list(paths: &[PathBuf]) -> String {
    let mut list = String::new();
    for path in paths {
        let escaped = path.to_string_lossy().replace('\'', "'\\''");
        list.push_str(&format!("file '{}'\n", escaped));
    }
    list
}

/// Build the command concatenating the clips listed in `list` to `output`.
///
/// Re-encodes so the output carries both streams at the fixed frame rate.
pub fn concat_command(list: &Path, output: &Path) -> FfmpegCommand {
    FfmpegCommand::new(list.to_string_lossy(), output)
        .input_args(["-f", "concat", "-safe", "0"])
        .video_codec("libx264")
        .audio_codec("aac")
        .pix_fmt("yuv420p")
        .frame_rate(FRAME_RATE)
}

/// Concatenate `clips` (already in artifact order) into `output`.
pub async fn concat_clips(
    runner: &FfmpegRunner,
    clips: &[PathBuf],
    list_path: &Path,
    output: &Path,
) -> MediaResult<()> {
    if clips.is_empty() {
        return Err(MediaError::InvalidMedia(
            "no clips to concatenate".to_string(),
        ));
    }

    tokio::fs::write(list_path, build_concat_list(clips)).await?;

    info!(
        clips = clips.len(),
        output = %output.display(),
        "Concatenating clips"
    );
    runner.run(&concat_command(list_path, output)).await
}
