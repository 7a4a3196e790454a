//! Runtime configuration
//!
//! Settings come from the process environment (after `.env` is loaded by the
//! binaries). Only the LLM credential is mandatory; everything else has a
//! default.

use crate::error::{AnalystError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MATCHES_CSV: &str = "matches.csv";
pub const DEFAULT_DELIVERIES_CSV: &str = "deliveries.csv";
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";

/// Settings for the chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl LlmConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup so tests don't have to touch
    /// the real process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AnalystError::Config(format!(
                    "{} not found. Add it to the environment or a .env file.",
                    API_KEY_VAR
                ))
            })?;

        let timeout_secs = match lookup("LLM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AnalystError::Config(format!("LLM_TIMEOUT_SECS must be a whole number, got '{}'", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Locations of the two input tables.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub matches: PathBuf,
    pub deliveries: PathBuf,
}

impl DataPaths {
    pub fn from_env() -> Self {
        Self {
            matches: std::env::var("MATCHES_CSV")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MATCHES_CSV)),
            deliveries: std::env::var("DELIVERIES_CSV")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DELIVERIES_CSV)),
        }
    }

    /// Apply command-line overrides on top of the environment defaults.
    pub fn with_overrides(mut self, matches: Option<PathBuf>, deliveries: Option<PathBuf>) -> Self {
        if let Some(path) = matches {
            self.matches = path;
        }
        if let Some(path) = deliveries {
            self.deliveries = path;
        }
        self
    }
}

pub fn server_addr_from_env() -> String {
    std::env::var("SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string())
}
