//! Error types for the Formgen core library
//!
//! This module defines the error handling system for Formgen, using
//! thiserror for ergonomic error definitions and anyhow for flexible
//! error contexts in adapter code.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Main error type for Formgen operations
#[derive(Error, Debug)]
pub enum Error {
    /// The candidate document failed structural or referential validation
    #[error("Form definition rejected: {errors}")]
    Structure {
        #[source]
        errors: ValidationErrors,
    },

    /// The generator's raw output could not be interpreted as structured data
    #[error("Malformed generator output: {detail}")]
    MalformedOutput {
        detail: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// The document generator call failed or returned an unusable response
    #[error("Generation failed: {message}")]
    Generation {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The transmission sink's network call failed
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Missing or invalid environment configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True if this failure is a definitive rejection of the generated
    /// document (as opposed to an infrastructure failure). A caller may
    /// choose to re-invoke the generator for a fresh candidate.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Structure { .. } | Error::MalformedOutput { .. })
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Structure { errors }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedOutput {
            detail: err.to_string(),
            source: Some(err),
        }
    }
}
