//! # formgen-api — HTTP boundary for Formgen
//!
//! A small axum service exposing the prompt-to-form pipeline:
//!
//! - `POST /create-form?prompt=...` — generate, validate, and transmit a
//!   form definition; responds with the form-management API's JSON body
//! - `GET /health` — liveness probe (unauthenticated)
//!
//! No business logic lives in route handlers; everything delegates to
//! [`formgen_core::FormService`]. Every propagated failure maps to one
//! generic error response via [`AppError`].

pub mod error;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use state::AppState;
