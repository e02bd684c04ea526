//! Transmission sink for validated form definitions
//!
//! Once a document has passed validation it is handed to the external
//! form-management API unchanged, as an opaque payload. The sink does not
//! retry; transport failures propagate to the caller as-is.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::info;
use url::Url;

use crate::config::SinkConfig;
use crate::error::{Error, Result};
use crate::types::ValidatedForm;

/// Destination for validated form definitions.
///
/// Takes `&ValidatedForm` rather than raw JSON so an unvalidated payload
/// cannot reach the network by construction.
#[async_trait]
pub trait TransmissionSink: Send + Sync {
    /// Transmit the validated document, returning the remote service's
    /// parsed JSON response
    async fn submit(&self, form: &ValidatedForm) -> Result<Value>;
}

/// Production sink: `POST {base_url}/forms` with a bearer token
#[derive(Debug)]
pub struct FormApiClient {
    client: Client,
    forms_url: Url,
    token: String,
}

impl FormApiClient {
    /// Build a client from configuration, with the given request timeout
    pub fn new(config: &SinkConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport {
                message: format!("failed to create HTTP client: {}", e),
                status_code: None,
                source: Some(e.into()),
            })?;

        // Url::join drops the base's last path segment unless it ends
        // with '/', so normalize before joining.
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let base = Url::parse(&base).map_err(|e| Error::Configuration {
            message: format!("invalid form API base URL '{}': {}", config.base_url, e),
        })?;
        let forms_url = base.join("forms").map_err(|e| Error::Configuration {
            message: format!("invalid form API base URL '{}': {}", config.base_url, e),
        })?;

        Ok(Self {
            client,
            forms_url,
            token: config.token.clone(),
        })
    }
}

#[async_trait]
impl TransmissionSink for FormApiClient {
    async fn submit(&self, form: &ValidatedForm) -> Result<Value> {
        let response = self
            .client
            .post(self.forms_url.clone())
            .bearer_auth(&self.token)
            .json(form.as_value())
            .send()
            .await
            .map_err(|e| Error::Transport {
                message: format!("form API request failed: {}", e),
                status_code: None,
                source: Some(e.into()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Transport {
                message: format!("form API returned {}: {}", status, detail),
                status_code: Some(status.as_u16()),
                source: None,
            });
        }

        info!(status = status.as_u16(), "form definition transmitted");
        response.json().await.map_err(|e| Error::Transport {
            message: format!("form API response was not JSON: {}", e),
            status_code: Some(status.as_u16()),
            source: Some(e.into()),
        })
    }
}
