//! # Application State
//!
//! Shared state for the axum application: one [`FormService`] shared by
//! every request. Validation itself is request-scoped and stateless, so
//! no locking is needed here.

use std::sync::Arc;

use formgen_core::FormService;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FormService>,
}

impl AppState {
    pub fn new(service: Arc<FormService>) -> Self {
        Self { service }
    }
}
