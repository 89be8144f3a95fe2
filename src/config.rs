//! Configuration management for moodflow.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `GEMINI_API_KEY` - Optional. Enables AI estimates and recommendations.
//! - `GEMINI_MODEL` - Optional. Defaults to `gemini-2.5-flash`.
//! - `GEMINI_API_BASE` - Optional. Defaults to `https://generativelanguage.googleapis.com`.
//! - `AI_TIMEOUT_SECS` - Optional. Per-request timeout for AI calls. Defaults to `30`.
//! - `AI_DEBUG` - Optional. Log raw and normalized AI responses (`1`/`true`/`yes`/`on`).
//! - `SUPABASE_URL` - Optional. Supabase project URL for task storage.
//! - `SUPABASE_SERVICE_ROLE_KEY` - Optional. Service role key for Supabase.

use std::time::Duration;

use thiserror::Error;

use crate::llm::{self, GeminiClient};
use crate::util::parse_bool_flag;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Task storage configuration.
#[derive(Debug, Clone, Default)]
pub struct SupabaseConfig {
    /// Supabase project URL
    pub url: Option<String>,

    /// Supabase service role key (for full access)
    pub service_role_key: Option<String>,
}

/// Generative-text configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Gemini API key; AI features are off without it
    pub api_key: Option<String>,

    /// Model identifier
    pub model: String,

    /// API base URL
    pub api_base: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Emit AI debug events
    pub debug: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: llm::DEFAULT_MODEL.to_string(),
            api_base: llm::DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            debug: false,
        }
    }
}

impl AiConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// AI configuration
    pub ai: AiConfig,

    /// Storage configuration
    pub supabase: SupabaseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ai: AiConfig::default(),
            supabase: SupabaseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a
    /// variable if it is set. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let host = get("HOST").unwrap_or(defaults.host);

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?,
            None => defaults.port,
        };

        let timeout = match get("AI_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                ConfigError::InvalidValue("AI_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?,
            None => defaults.ai.timeout,
        };

        let ai = AiConfig {
            api_key: get("GEMINI_API_KEY"),
            model: get("GEMINI_MODEL").unwrap_or(defaults.ai.model),
            api_base: get("GEMINI_API_BASE").unwrap_or(defaults.ai.api_base),
            timeout,
            debug: get("AI_DEBUG")
                .map(|v| parse_bool_flag(&v))
                .unwrap_or(false),
        };

        let supabase = SupabaseConfig {
            url: get("SUPABASE_URL"),
            service_role_key: get("SUPABASE_SERVICE_ROLE_KEY"),
        };

        Ok(Self {
            host,
            port,
            ai,
            supabase,
        })
    }

    /// Build the Gemini client if an API key is configured.
    pub fn gemini_client(&self) -> Result<Option<GeminiClient>, llm::LlmError> {
        let Some(api_key) = self.ai.api_key.clone() else {
            return Ok(None);
        };
        GeminiClient::new(
            api_key,
            self.ai.model.clone(),
            &self.ai.api_base,
            self.ai.timeout,
        )
        .map(Some)
    }
}
