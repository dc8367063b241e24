use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::json;
use std::fmt;
use tracing::error;

/// External collaborators whose failures surface as a generic 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Stt,
    Llm,
    Tts,
    Storage,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Service::Stt => "speech-to-text",
            Service::Llm => "language model",
            Service::Tts => "text-to-speech",
            Service::Storage => "storage",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{service} failure: {reason}")]
    Collaborator { service: Service, reason: String },
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn collaborator(service: Service, reason: impl fmt::Display) -> Self {
        AppError::Collaborator {
            service,
            reason: reason.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Collaborator { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Errors raised by a conversation store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("contact already registered: {0}")]
    Duplicate(String),

    #[error("{0}")]
    Backend(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(_) => AppError::Validation(e.to_string()),
            StoreError::Backend(reason) => AppError::Collaborator {
                service: Service::Storage,
                reason,
            },
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        error!(error=%e, "database error");
        StoreError::Backend(e.to_string())
    }
}

/// Configuration errors raised at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error=%self, "request failed");
        }
        // Collaborator internals are not leaked to callers.
        let detail = match &self {
            AppError::Collaborator { service, .. } => format!("{service} failure"),
            other => other.to_string(),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
