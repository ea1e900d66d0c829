//! Scene input and rendered clip types.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One narrated unit of input: a caption and the text spoken over it.
///
/// Scene order within a submission is significant; the final artifact
/// contains the scenes in exactly this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Scene {
    /// Caption text drawn onto the visual track
    #[serde(rename = "scene_description")]
    pub description: String,

    /// Text sent to the speech synthesizer
    pub narration: String,
}

impl Scene {
    /// Create a new scene.
    pub fn new(description: impl Into<String>, narration: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            narration: narration.into(),
        }
    }
}

/// A single rendered audio-visual segment for one scene.
///
/// The clip file lives in the job's scratch workspace and is owned by the
/// rendering pipeline until the compositor consumes it during assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedClip {
    /// Zero-based index of the source scene in the submitted sequence
    pub index: usize,
    /// Path to the rendered clip file
    pub path: PathBuf,
}

impl RenderedClip {
    /// Create a rendered clip handle.
    pub fn new(index: usize, path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            path: path.into(),
        }
    }
}
