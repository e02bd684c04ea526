//! # Routes
//!
//! - `POST /create-form` — the single string parameter `prompt` arrives
//!   as a query parameter; the response is the form-management API's
//!   JSON body, passed through
//! - `GET /health` — liveness probe

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::state::AppState;

/// Query parameters for the create-form endpoint
#[derive(Debug, Deserialize)]
pub struct CreateFormParams {
    /// Free-text description of the desired form
    pub prompt: String,
}

/// Build the application router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-form", post(create_form))
        .route("/health", get(health))
}

/// POST /create-form — generate, validate, and transmit a form definition
async fn create_form(
    State(state): State<AppState>,
    Query(params): Query<CreateFormParams>,
) -> Result<Json<Value>, AppError> {
    let response = state.service.create_and_submit(&params.prompt).await?;
    Ok(Json(response))
}

/// GET /health — liveness probe
async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use formgen_core::{
        CandidateDocument, Error, FormGenerator, FormService, Result, TransmissionSink,
        ValidatedForm,
    };
    use http_body_util::BodyExt;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct FixedGenerator {
        document: Value,
    }

    #[async_trait]
    impl FormGenerator for FixedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<CandidateDocument> {
            Ok(CandidateDocument::from_value(self.document.clone()))
        }
    }

    struct OkSink;

    #[async_trait]
    impl TransmissionSink for OkSink {
        async fn submit(&self, _form: &ValidatedForm) -> Result<Value> {
            Ok(json!({ "id": "form-123" }))
        }
    }

    struct FailingSink;

    #[async_trait]
    impl TransmissionSink for FailingSink {
        async fn submit(&self, _form: &ValidatedForm) -> Result<Value> {
            Err(Error::Transport {
                message: "form API returned 503 Service Unavailable".to_string(),
                status_code: Some(503),
                source: None,
            })
        }
    }

    fn valid_document() -> Value {
        json!({
            "form": { "name": "Contact", "status": "draft", "type": "bpmnusertask" },
            "formVersion": {
                "formId": "contact",
                "version": 1,
                "formGroups": [
                    {
                        "name": "Main",
                        "refKey": "s1",
                        "fields": [ { "name": "Email", "fieldType": "text", "refKey": "s1" } ]
                    }
                ]
            }
        })
    }

    fn app(document: Value, sink: Arc<dyn TransmissionSink>) -> Router {
        let service = FormService::new(Arc::new(FixedGenerator { document }), sink);
        router().with_state(AppState::new(Arc::new(service)))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_form_returns_sink_response() {
        let app = app(valid_document(), Arc::new(OkSink));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/create-form?prompt=a%20contact%20form")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "id": "form-123" }));
    }

    #[tokio::test]
    async fn test_rejected_document_yields_500_with_detail() {
        let mut document = valid_document();
        document["formVersion"]["formGroups"][0]["fields"][0]["fieldType"] = json!("date");
        let app = app(document, Arc::new(OkSink));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/create-form?prompt=whatever")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        let detail = body["detail"].as_str().unwrap();
        assert!(detail.contains("invalid field type: date"), "detail: {}", detail);
    }

    #[tokio::test]
    async fn test_transport_failure_yields_same_generic_shape() {
        let app = app(valid_document(), Arc::new(FailingSink));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/create-form?prompt=whatever")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_missing_prompt_is_a_client_error() {
        let app = app(valid_document(), Arc::new(OkSink));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/create-form")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_health_probe() {
        let app = app(valid_document(), Arc::new(OkSink));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
