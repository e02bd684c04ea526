//! Environment-backed configuration
//!
//! All external endpoints and credentials are read from the environment
//! once at startup; the rest of the crate receives plain config structs.
//! Loading a `.env` file (if any) is the binary's responsibility and
//! happens before [`Config::from_env`] is called.

use crate::error::{Error, Result};

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Settings for the Gemini document generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// API key sent with every generateContent call
    pub api_key: String,
    /// Model identifier, e.g. "gemini-1.5-pro"
    pub model: String,
    /// Base URL of the Gemini REST API
    pub base_url: String,
}

/// Settings for the form-management API the validated payload is sent to
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Base URL of the form-management API
    pub base_url: String,
    /// Bearer token attached to every request
    pub token: String,
}

/// Full service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub sink: SinkConfig,
    /// Address the HTTP boundary binds to
    pub bind_addr: String,
    /// Timeout applied to outbound HTTP calls
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    /// Exists so tests can supply variables without touching the
    /// process-wide environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let generator = GeneratorConfig {
            api_key: required(&lookup, "GEMINI_API_KEY")?,
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
        };

        let sink = SinkConfig {
            base_url: required(&lookup, "FORM_API_BASE_URL")?,
            token: required(&lookup, "FORM_API_TOKEN")?,
        };

        let http_timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            None => DEFAULT_HTTP_TIMEOUT_SECS,
            Some(raw) => raw.parse().map_err(|_| Error::Configuration {
                message: format!("HTTP_TIMEOUT_SECS is not a number: '{}'", raw),
            })?,
        };

        Ok(Self {
            generator,
            sink,
            bind_addr: lookup("FORMGEN_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            http_timeout_secs,
        })
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Configuration {
            message: format!("missing required environment variable {}", name),
        }),
    }
}
