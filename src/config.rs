use crate::consts::{
    DEFAULT_BIND_ADDR, DEFAULT_CARTESIA_BASE_URL, DEFAULT_CARTESIA_VOICE_ID, DEFAULT_GROQ_BASE_URL,
};
use crate::error::ConfigError;

use std::net::SocketAddr;

/// Runtime configuration, read from the environment after `.env` has been loaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Postgres connection string.  Without one, conversations live in memory.
    pub database_url: Option<String>,
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub cartesia_api_key: String,
    pub cartesia_base_url: String,
    pub cartesia_voice_id: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.  Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::MissingEnvVar(key));

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                key: "BIND_ADDR",
                message: e.to_string(),
            })?;

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            groq_api_key: require("GROQ_API_KEY")?,
            groq_base_url: get("GROQ_BASE_URL").unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string()),
            cartesia_api_key: require("CARTESIA_API_KEY")?,
            cartesia_base_url: get("CARTESIA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_CARTESIA_BASE_URL.to_string()),
            cartesia_voice_id: get("CARTESIA_VOICE_ID")
                .unwrap_or_else(|| DEFAULT_CARTESIA_VOICE_ID.to_string()),
        })
    }
}
