//! Orchestration of the generate → validate → transmit pipeline

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::client::{FormApiClient, TransmissionSink};
use crate::config::Config;
use crate::error::Result;
use crate::generator::{FormGenerator, GeminiGenerator};
use crate::validation::FormDefinitionValidator;

/// Drives one prompt through the full pipeline.
///
/// Collaborators are injected as trait objects, so the service is
/// testable with substitute generators and sinks and holds no
/// process-global state.
pub struct FormService {
    generator: Arc<dyn FormGenerator>,
    sink: Arc<dyn TransmissionSink>,
    validator: FormDefinitionValidator,
}

impl FormService {
    pub fn new(generator: Arc<dyn FormGenerator>, sink: Arc<dyn TransmissionSink>) -> Self {
        Self {
            generator,
            sink,
            validator: FormDefinitionValidator::new(),
        }
    }

    /// Wire up the production collaborators from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);
        let generator = GeminiGenerator::new(&config.generator, timeout)?;
        let sink = FormApiClient::new(&config.sink, timeout)?;
        Ok(Self::new(Arc::new(generator), Arc::new(sink)))
    }

    /// Generate a form definition for the prompt, validate it, and hand
    /// it to the transmission sink. Returns the sink's parsed response.
    ///
    /// A rejected document is a definitive failure for that candidate;
    /// no repair or partial acceptance happens here.
    #[instrument(skip(self), fields(prompt_chars = prompt.len()))]
    pub async fn create_and_submit(&self, prompt: &str) -> Result<Value> {
        let candidate = self.generator.generate(prompt).await?;
        debug!("generated candidate document: {}", candidate.as_value());

        let form = self.validator.validate(candidate)?;
        info!("form definition accepted");

        self.sink.submit(&form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{CandidateDocument, ValidatedForm};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Generator stub returning a fixed document
    struct FixedGenerator {
        document: Value,
    }

    #[async_trait]
    impl FormGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<CandidateDocument> {
            Ok(CandidateDocument::from_value(self.document.clone()))
        }
    }

    /// Sink stub recording every submission
    #[derive(Default)]
    struct RecordingSink {
        submissions: AtomicUsize,
        last_payload: Mutex<Option<Value>>,
    }

    #[async_trait]
    impl TransmissionSink for RecordingSink {
        async fn submit(&self, form: &ValidatedForm) -> Result<Value> {
            self.submissions.fetch_add(1, Ordering::SeqCst);
            *self.last_payload.lock().unwrap() = Some(form.as_value().clone());
            Ok(json!({ "id": "form-123", "status": "created" }))
        }
    }

    fn contact_form_document() -> Value {
        json!({
            "form": { "name": "Contact", "description": "", "status": "draft", "type": "bpmnusertask" },
            "formVersion": {
                "formId": "contact",
                "version": 1,
                "formGroups": [
                    {
                        "name": "Main",
                        "sequence": 1,
                        "refKey": "s1",
                        "fields": [
                            { "name": "Email", "sequence": 1, "fieldType": "text", "refKey": "s1" }
                        ]
                    }
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_valid_document_reaches_sink_exactly_once() {
        let document = contact_form_document();
        let sink = Arc::new(RecordingSink::default());
        let service = FormService::new(
            Arc::new(FixedGenerator {
                document: document.clone(),
            }),
            sink.clone(),
        );

        let response = service.create_and_submit("a contact form").await.unwrap();

        assert_eq!(response["status"], "created");
        assert_eq!(sink.submissions.load(Ordering::SeqCst), 1);
        assert_eq!(*sink.last_payload.lock().unwrap(), Some(document));
    }

    #[tokio::test]
    async fn test_rejected_document_never_reaches_sink() {
        let mut document = contact_form_document();
        document["formVersion"]["formGroups"][0]["fields"][0]["fieldType"] = json!("date");
        let sink = Arc::new(RecordingSink::default());
        let service = FormService::new(Arc::new(FixedGenerator { document }), sink.clone());

        let err = service.create_and_submit("a contact form").await.unwrap_err();

        assert!(matches!(err, Error::Structure { .. }));
        assert!(err.to_string().contains("invalid field type: date"));
        assert_eq!(sink.submissions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generator_failure_propagates() {
        struct FailingGenerator;

        #[async_trait]
        impl FormGenerator for FailingGenerator {
            async fn generate(&self, _prompt: &str) -> Result<CandidateDocument> {
                Err(Error::Generation {
                    message: "model unavailable".to_string(),
                    source: None,
                })
            }
        }

        let sink = Arc::new(RecordingSink::default());
        let service = FormService::new(Arc::new(FailingGenerator), sink.clone());

        let err = service.create_and_submit("anything").await.unwrap_err();
        assert!(matches!(err, Error::Generation { .. }));
        assert_eq!(sink.submissions.load(Ordering::SeqCst), 0);
    }
}
