//! Seams to the external collaborators.  The router only ever sees these traits; the vendor
//! clients in `groq` and `cartesia` implement them.

use crate::error::AppError;
use crate::openai_types::OpenAIMessage;

use async_trait::async_trait;

/// Text produced by a language-model completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Turn recorded caller audio into text.  `filename` lets the vendor sniff the container.
    async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String, AppError>;
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: Vec<OpenAIMessage>) -> Result<Completion, AppError>;
}

#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, AppError>;
}
