use crate::consts::{CARTESIA_API_VERSION, CARTESIA_MODEL, CARTESIA_SAMPLE_RATE};
use crate::error::{AppError, Service};
use crate::services::Synthesizer;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

#[derive(Serialize, Debug)]
pub struct TtsBytesRequest<'a> {
    pub model_id: &'a str,
    pub transcript: &'a str,
    pub voice: VoiceSpecifier<'a>,
    pub output_format: OutputFormat,
}

#[derive(Serialize, Debug)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum VoiceSpecifier<'a> {
    Id { id: &'a str },
}

#[derive(Serialize, Debug)]
pub struct OutputFormat {
    pub container: &'static str,
    pub encoding: &'static str,
    pub sample_rate: u32,
}

impl OutputFormat {
    /// 32-bit float PCM in a WAV container, playable directly by a browser audio element.
    pub fn wav() -> Self {
        Self {
            container: "wav",
            encoding: "pcm_f32le",
            sample_rate: CARTESIA_SAMPLE_RATE,
        }
    }
}

/// Client for Cartesia's `/tts/bytes` endpoint.
pub struct CartesiaClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    voice_id: String,
}

impl CartesiaClient {
    pub fn new(
        http_client: reqwest::Client,
        api_key: String,
        base_url: String,
        voice_id: String,
    ) -> Self {
        Self {
            http_client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            voice_id,
        }
    }

    fn request<'a>(&'a self, text: &'a str) -> TtsBytesRequest<'a> {
        TtsBytesRequest {
            model_id: CARTESIA_MODEL,
            transcript: text,
            voice: VoiceSpecifier::Id { id: &self.voice_id },
            output_format: OutputFormat::wav(),
        }
    }
}

#[async_trait]
impl Synthesizer for CartesiaClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::validation("text is empty"));
        }
        let url = format!("{}/tts/bytes", self.base_url);
        let resp = self
            .http_client
            .post(url)
            .header("X-API-Key", &self.api_key)
            .header("Cartesia-Version", CARTESIA_API_VERSION)
            .json(&self.request(text))
            .send()
            .await
            .map_err(|e| {
                error!(error=%e, "failed to send tts request to Cartesia");
                AppError::collaborator(Service::Tts, e)
            })?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(status=%status, body=%body, "Cartesia rejected tts request");
            return Err(AppError::collaborator(Service::Tts, format!("{status}: {body}")));
        }
        let bytes = resp.bytes().await.map_err(|e| {
            error!(error=%e, "failed to read Cartesia tts body");
            AppError::collaborator(Service::Tts, e)
        })?;
        debug!(len = bytes.len(), "got cartesia tts payload");

        Ok(bytes.to_vec())
    }
}
