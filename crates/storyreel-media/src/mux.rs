//! Audio/visual muxing with an explicit duration policy.
//!
//! The visual track's fixed duration always wins: narration longer than the
//! clip is truncated, shorter narration is padded with trailing silence
//! (`apad` plus a pinned output duration).

use std::path::Path;
use tracing::debug;

use crate::caption::SCENE_DURATION_SECS;
use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Build the command muxing `audio` onto `video` at `output`.
pub fn mux_command(video: &Path, audio: &Path, output: &Path) -> FfmpegCommand {
    FfmpegCommand::new(video.to_string_lossy(), output)
        .extra_input(audio.to_string_lossy())
        .map("0:v:0")
        .map("1:a:0")
        .video_codec("copy")
        .audio_codec("aac")
        .audio_filter("apad")
        .output_duration(SCENE_DURATION_SECS)
}

/// Mux a narration track onto a rendered visual track.
pub async fn mux_audio(
    runner: &FfmpegRunner,
    video: &Path,
    audio: &Path,
    output: &Path,
) -> MediaResult<()> {
    debug!(
        video = %video.display(),
        audio = %audio.display(),
        output = %output.display(),
        "Muxing narration onto visual track"
    );
    runner.run(&mux_command(video, audio, output)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mux_command_takes_both_inputs() {
        let cmd = mux_command(
            &PathBuf::from("scene_0_caption.mp4"),
            &PathBuf::from("scene_0.mp3"),
            &PathBuf::from("scene_0.mp4"),
        );
        let args = cmd.build_args();

        assert!(args.contains(&"scene_0_caption.mp4".to_string()));
        assert!(args.contains(&"scene_0.mp3".to_string()));
        assert!(args.contains(&"0:v:0".to_string()));
        assert!(args.contains(&"1:a:0".to_string()));
    }

    #[test]
    fn test_mux_duration_policy_is_truncate_and_pad() {
        let cmd = mux_command(
            &PathBuf::from("v.mp4"),
            &PathBuf::from("a.mp3"),
            &PathBuf::from("o.mp4"),
        );
        let args = cmd.build_args();

        // Short narration is padded with silence...
        let af = args.iter().position(|a| a == "-af").unwrap();
        assert_eq!(args[af + 1], "apad");

        // ...and the output is pinned to the visual track's duration, which
        // truncates longer narration.
        let t = args.iter().position(|a| a == "-t").unwrap();
        assert_eq!(args[t + 1], "6.000");
    }
}
