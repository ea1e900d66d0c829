//! HTTP client for the speech synthesis service.
//!
//! The TTS service is an opaque collaborator: POST a JSON body carrying the
//! narration text, receive raw audio bytes back. Non-success responses
//! surface as [`TtsError::Status`].

pub mod client;
pub mod error;

pub use client::{TtsClient, TtsConfig};
pub use error::{TtsError, TtsResult};
