//! # Application Error
//!
//! Maps every failure propagated out of the pipeline to one generic HTTP
//! response: status 500 with the failure's string description as `detail`.
//! Structure errors and transport errors are deliberately not
//! distinguished to the end caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

/// Boundary-level wrapper around a pipeline failure
#[derive(Debug)]
pub struct AppError(pub formgen_core::Error);

impl From<formgen_core::Error> for AppError {
    fn from(err: formgen_core::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("request failed: {}", self.0);
        let body = serde_json::json!({ "detail": self.0.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
