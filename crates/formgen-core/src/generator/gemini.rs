//! Gemini-backed form generator
//!
//! Calls the Gemini REST `generateContent` endpoint with the rendered
//! instruction template, pulls the model's text out of the response, and
//! parses it into a [`CandidateDocument`]. Models occasionally wrap their
//! answer in a Markdown code fence despite being told not to, so the fence
//! is stripped before parsing.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::generator::{prompt::render_instructions, FormGenerator};
use crate::types::CandidateDocument;

/// Matches an answer wrapped in a single Markdown code fence
static FENCE: OnceLock<Regex> = OnceLock::new();

fn fence_pattern() -> &'static Regex {
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```(?:json)?\s*(.+?)\s*```\s*$").expect("fence pattern is valid")
    })
}

/// Production [`FormGenerator`] backed by the Gemini REST API
pub struct GeminiGenerator {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl GeminiGenerator {
    /// Build a generator from configuration, with the given request timeout
    pub fn new(config: &GeneratorConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Generation {
                message: format!("failed to create HTTP client: {}", e),
                source: Some(e.into()),
            })?;

        // Url::join drops the base's last path segment unless it ends
        // with '/', so normalize before joining.
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let base = Url::parse(&base).map_err(|e| Error::Configuration {
            message: format!("invalid Gemini base URL '{}': {}", config.base_url, e),
        })?;
        let endpoint = base
            .join(&format!("v1beta/models/{}:generateContent", config.model))
            .map_err(|e| Error::Configuration {
                message: format!("invalid Gemini model '{}': {}", config.model, e),
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    async fn call_model(&self, instructions: &str) -> Result<Value> {
        let body = json!({
            "contents": [
                { "parts": [ { "text": instructions } ] }
            ],
            "generationConfig": {
                "temperature": 0.0,
                "responseMimeType": "application/json"
            }
        });

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Generation {
                message: format!("generateContent request failed: {}", e),
                source: Some(e.into()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Generation {
                message: format!("generateContent returned {}: {}", status, detail),
                source: None,
            });
        }

        response.json().await.map_err(|e| Error::Generation {
            message: format!("generateContent response was not JSON: {}", e),
            source: Some(e.into()),
        })
    }
}

#[async_trait]
impl FormGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<CandidateDocument> {
        let instructions = render_instructions(prompt);
        let response = self.call_model(&instructions).await?;
        let text = extract_text(&response)?;
        debug!(chars = text.len(), "received model output");
        parse_candidate(&text)
    }
}

/// Pull the first candidate's text out of a generateContent response
fn extract_text(response: &Value) -> Result<String> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::Generation {
            message: "generateContent response contained no candidate text".to_string(),
            source: None,
        })
}

/// Strip a single wrapping Markdown code fence, if present
fn strip_code_fence(raw: &str) -> &str {
    match fence_pattern().captures(raw) {
        Some(captures) => captures.get(1).map(|m| m.as_str()).unwrap_or(raw),
        None => raw,
    }
}

/// Parse raw model text into a candidate document
fn parse_candidate(raw: &str) -> Result<CandidateDocument> {
    CandidateDocument::parse(strip_code_fence(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fence_with_language_tag() {
        let raw = "```json\n{\"form\": {}}\n```";
        assert_eq!(strip_code_fence(raw), "{\"form\": {}}");
    }

    #[test]
    fn test_strip_fence_without_language_tag() {
        let raw = "```\n{\"form\": {}}\n```";
        assert_eq!(strip_code_fence(raw), "{\"form\": {}}");
    }

    #[test]
    fn test_bare_json_left_untouched() {
        let raw = "{\"form\": {}}";
        assert_eq!(strip_code_fence(raw), raw);
    }

    #[test]
    fn test_parse_candidate_rejects_prose() {
        let result = parse_candidate("Here is the form you asked for.");
        assert!(matches!(result, Err(Error::MalformedOutput { .. })));
    }

    #[test]
    fn test_extract_text_from_generate_content_response() {
        let response = json!({
            "candidates": [
                {
                    "content": {
                        "parts": [ { "text": "{\"form\": {}}" } ],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ]
        });
        assert_eq!(extract_text(&response).unwrap(), "{\"form\": {}}");
    }

    #[test]
    fn test_extract_text_without_candidates_fails() {
        let response = json!({ "candidates": [] });
        let err = extract_text(&response).unwrap_err();
        assert!(err.to_string().contains("no candidate text"));
    }

    #[test]
    fn test_endpoint_built_from_config() {
        let config = GeneratorConfig {
            api_key: "k".to_string(),
            model: "gemini-1.5-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        };
        let generator = GeminiGenerator::new(&config, Duration::from_secs(5)).unwrap();
        assert_eq!(
            generator.endpoint.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn test_base_url_path_preserved_without_trailing_slash() {
        let config = GeneratorConfig {
            api_key: "k".to_string(),
            model: "gemini-1.5-pro".to_string(),
            base_url: "https://proxy.example.com/gemini".to_string(),
        };
        let generator = GeminiGenerator::new(&config, Duration::from_secs(5)).unwrap();
        assert_eq!(
            generator.endpoint.as_str(),
            "https://proxy.example.com/gemini/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }
}
