//! Captioned frame rendering.
//!
//! Each scene's visual track is a fixed-duration solid-color frame with the
//! scene description drawn centered, generated entirely by FFmpeg's lavfi
//! source (no input file).

use std::path::Path;
use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Duration of every scene's visual track, in seconds.
pub const SCENE_DURATION_SECS: f64 = 6.0;

/// Output frame rate.
pub const FRAME_RATE: u32 = 24;

/// Frame width in pixels.
pub const FRAME_WIDTH: u32 = 1280;

/// Frame height in pixels.
pub const FRAME_HEIGHT: u32 = 720;

/// Caption font size.
const CAPTION_FONT_SIZE: u32 = 50;

/// Build the command rendering a captioned clip to `output`.
pub fn caption_command(text: &str, output: &Path) -> FfmpegCommand {
    let source = format!(
        "color=c=black:s={}x{}:d={}:r={}",
        FRAME_WIDTH, FRAME_HEIGHT, SCENE_DURATION_SECS, FRAME_RATE
    );
    let filter = format!(
        "drawtext=text='{}':fontcolor=white:fontsize={}:x=(w-text_w)/2:y=(h-text_h)/2",
        escape_drawtext(text),
        CAPTION_FONT_SIZE
    );

    FfmpegCommand::new(source, output)
        .input_args(["-f", "lavfi"])
        .video_filter(filter)
        .video_codec("libx264")
        .pix_fmt("yuv420p")
}

/// Render the captioned visual track for one scene.
pub async fn render_caption_clip(
    runner: &FfmpegRunner,
    text: &str,
    output: &Path,
) -> MediaResult<()> {
    debug!(output = %output.display(), "Rendering captioned frame clip");
    runner.run(&caption_command(text, output)).await
}

/// Escape caption text for use inside a quoted drawtext argument.
///
/// Backslash must go first; the rest are characters the filter graph parser
/// treats specially.
fn escape_drawtext(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(':', "\\:")
        .replace('%', "\\%")
}
