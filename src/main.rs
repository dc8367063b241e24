mod api_types;
mod cartesia;
mod config;
mod db_types;
mod error;
mod groq;
mod handlers;
mod openai_types;
mod pg_store;
mod router;
mod services;
mod store;
mod twilio_types;
mod types;
mod utils;

use crate::cartesia::CartesiaClient;
use crate::config::Config;
use crate::groq::GroqClient;
use crate::pg_store::PgStore;
use crate::router::ConversationRouter;
use crate::store::{ConversationStore, MemoryStore};
use crate::types::AppState;

use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::prelude::*;

pub mod consts {
    pub const DEFAULT_PROMPT: &str = "You are an AI-powered call-handling assistant trained to \
        respond to unknown callers. Your goal is to keep the conversation going for as long as \
        possible while sounding like a real human. Ask follow-up questions, act slightly curious, \
        and try to prolong the chat without revealing personal information. Don't ask too many \
        questions in a single turn. Responses should be concise and engaging.";
    pub const CLASSIFIER_PROMPT: &str = "You screen messages sent by people who are not in the \
        user's contacts. Decide whether the message is spam. Answer with exactly one word: \
        spam or unknown.";
    pub const KNOWN_SENDER_DETAIL: &str = "Message from a saved contact; no bot reply.";
    pub const SPAM_DETAIL: &str = "Message classified as spam; no reply sent.";
    pub const DEFAULT_AUDIO_FILENAME: &str = "audio.m4a";
    // Groq's upload cap for transcription
    pub const MAX_AUDIO_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

    pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
    pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
    pub const GROQ_CHAT_MODEL: &str = "llama-3.3-70b-versatile";
    pub const GROQ_STT_MODEL: &str = "whisper-large-v3";
    pub const GROQ_MAX_COMPLETION_TOKENS: u32 = 64;

    pub const DEFAULT_CARTESIA_BASE_URL: &str = "https://api.cartesia.ai";
    pub const CARTESIA_API_VERSION: &str = "2024-06-10";
    pub const CARTESIA_MODEL: &str = "sonic";
    // Barbershop Man
    pub const DEFAULT_CARTESIA_VOICE_ID: &str = "694f9389-aac1-45b6-b726-9d9369183238";
    pub const CARTESIA_SAMPLE_RATE: u32 = 44_100;
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_file(true)
                .with_line_number(true),
        )
        .with(tracing_subscriber::filter::Targets::new().with_targets([
            ("hyper", tracing_subscriber::filter::LevelFilter::OFF),
            ("sqlx", tracing_subscriber::filter::LevelFilter::WARN),
            (
                "spam_blocker_rs",
                tracing_subscriber::filter::LevelFilter::DEBUG,
            ),
        ]));
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = dotenv {
        debug!(error=%e, "no .env loaded");
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error=%e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let store: Arc<dyn ConversationStore> = match &config.database_url {
        Some(url) => match PgStore::connect(url).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                error!(error=%e, "failed to open postgres store");
                return ExitCode::FAILURE;
            }
        },
        None => {
            warn!("DATABASE_URL not set; conversations are kept in memory");
            Arc::new(MemoryStore::new())
        }
    };

    let http_client = reqwest::Client::new();
    let groq = Arc::new(GroqClient::new(
        http_client.clone(),
        config.groq_api_key.clone(),
        config.groq_base_url.clone(),
    ));
    let cartesia = Arc::new(CartesiaClient::new(
        http_client,
        config.cartesia_api_key.clone(),
        config.cartesia_base_url.clone(),
        config.cartesia_voice_id.clone(),
    ));
    let router = ConversationRouter::new(store, groq.clone(), groq, cartesia);

    let app_state = Arc::new(AppState {
        router: Arc::new(router),
    });
    let app = handlers::app(app_state);

    let server = match axum::Server::try_bind(&config.bind_addr) {
        Ok(server) => server,
        Err(e) => {
            error!(error=%e, addr=%config.bind_addr, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!(addr=%config.bind_addr, "listening");
    if let Err(e) = server.serve(app.into_make_service()).await {
        error!(error=%e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
