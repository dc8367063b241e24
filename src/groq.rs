use crate::consts::{GROQ_CHAT_MODEL, GROQ_MAX_COMPLETION_TOKENS, GROQ_STT_MODEL};
use crate::error::{AppError, Service};
use crate::openai_types::{
    OpenAIBatchResponse, OpenAIErrorBody, OpenAIMessage, OpenAIPayload, TranscriptionResponse,
};
use crate::services::{ChatModel, Completion, Transcriber};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, error};

/// Client for Groq's OpenAI-compatible API: Whisper transcription and chat completions.
pub struct GroqClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(http_client: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self {
            http_client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Pull the vendor's error message out of a failed response, falling back to the raw body.
async fn vendor_error(resp: reqwest::Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    match serde_json::from_str::<OpenAIErrorBody>(&body) {
        Ok(parsed) => format!(
            "{status}: {} ({})",
            parsed.error.message,
            parsed.error.kind.as_deref().unwrap_or("unknown")
        ),
        Err(_) => format!("{status}: {body}"),
    }
}

#[async_trait]
impl Transcriber for GroqClient {
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, AppError> {
        if audio.is_empty() {
            return Err(AppError::validation("audio is empty"));
        }
        let part = Part::bytes(audio).file_name(filename.to_string());
        let form = Form::new()
            .part("file", part)
            .text("model", GROQ_STT_MODEL)
            .text("response_format", "verbose_json");
        let resp = self
            .http_client
            .post(self.url("audio/transcriptions"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error=%e, "failed to send transcription request to Groq");
                AppError::collaborator(Service::Stt, e)
            })?;
        if !resp.status().is_success() {
            let reason = vendor_error(resp).await;
            error!(reason=%reason, "Groq rejected transcription request");
            return Err(AppError::collaborator(Service::Stt, reason));
        }
        let resp = resp.json::<TranscriptionResponse>().await.map_err(|e| {
            error!(error=%e, "failed to deserialize Groq transcription response");
            AppError::collaborator(Service::Stt, e)
        })?;
        debug!(language=?resp.language, duration=?resp.duration, "transcribed audio");

        Ok(resp.text.trim().to_string())
    }
}

#[async_trait]
impl ChatModel for GroqClient {
    async fn complete(&self, messages: Vec<OpenAIMessage>) -> Result<Completion, AppError> {
        let payload = OpenAIPayload {
            model: GROQ_CHAT_MODEL.to_string(),
            messages,
            temperature: Some(1.0),
            top_p: Some(1.0),
            max_completion_tokens: Some(GROQ_MAX_COMPLETION_TOKENS),
            stream: Some(false),
        };
        let resp = self
            .http_client
            .post(self.url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error=%e, "failed to send completion request to Groq");
                AppError::collaborator(Service::Llm, e)
            })?;
        if !resp.status().is_success() {
            let reason = vendor_error(resp).await;
            error!(reason=%reason, "Groq rejected completion request");
            return Err(AppError::collaborator(Service::Llm, reason));
        }
        let resp = resp.json::<OpenAIBatchResponse>().await.map_err(|e| {
            error!(error=%e, "failed to deserialize Groq completion response");
            AppError::collaborator(Service::Llm, e)
        })?;
        if let Some(usage) = &resp.usage {
            debug!(
                id=%resp.id,
                model=%resp.model,
                prompt_tokens=usage.prompt_tokens,
                completion_tokens=usage.completion_tokens,
                total_tokens=usage.total_tokens,
                "got completion"
            );
        }

        completion_from_response(resp)
    }
}

fn completion_from_response(resp: OpenAIBatchResponse) -> Result<Completion, AppError> {
    let choice = resp.choices.into_iter().next().ok_or_else(|| {
        error!("Groq completion response had no choices");
        AppError::collaborator(Service::Llm, "completion response had no choices")
    })?;
    debug!(index=choice.index, finish_reason=?choice.finish_reason, "using first choice");

    Ok(Completion {
        text: choice.message.content,
    })
}
