//! Speech synthesis client.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{TtsError, TtsResult};

/// Default endpoint of the local TTS sidecar.
const DEFAULT_TTS_URL: &str = "http://localhost:5000/tts";

/// TTS client configuration.
#[derive(Debug, Clone)]
pub struct TtsConfig {
    /// Endpoint accepting `{"text": ...}` and returning audio bytes
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_TTS_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl TtsConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("TTS_URL").unwrap_or_else(|_| DEFAULT_TTS_URL.to_string()),
            timeout_secs: std::env::var("TTS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
        }
    }
}

/// Speech synthesis request body.
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
}

/// Client for the speech synthesis service.
#[derive(Debug, Clone)]
pub struct TtsClient {
    config: TtsConfig,
    client: Client,
}

impl TtsClient {
    /// Create a new TTS client.
    pub fn new(config: TtsConfig) -> TtsResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Create from environment variables.
    pub fn from_env() -> TtsResult<Self> {
        Self::new(TtsConfig::from_env())
    }

    /// Endpoint this client talks to.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Synthesize speech for the given text, returning raw audio bytes.
    pub async fn synthesize(&self, text: &str) -> TtsResult<Vec<u8>> {
        debug!(url = %self.config.url, chars = text.len(), "Requesting speech synthesis");

        let response = self
            .client
            .post(&self.config.url)
            .json(&TtsRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        info!(bytes = bytes.len(), "Speech synthesis complete");
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server_uri: &str) -> TtsClient {
        TtsClient::new(TtsConfig {
            url: format!("{}/tts", server_uri),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_synthesize_returns_audio_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tts"))
            .and(body_json(serde_json::json!({ "text": "hello" })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3fakeaudio".to_vec()))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let bytes = client.synthesize("hello").await.unwrap();
        assert_eq!(bytes, b"ID3fakeaudio");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("synth backend down"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.synthesize("hello").await.unwrap_err();
        match err {
            TtsError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("synth backend down"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
