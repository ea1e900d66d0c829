//! TTS client error types.

use thiserror::Error;

pub type TtsResult<T> = Result<T, TtsError>;

#[derive(Debug, Error)]
pub enum TtsError {
    #[error("TTS request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TTS service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TtsError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
