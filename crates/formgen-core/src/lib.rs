//! Formgen Core - prompt-driven form-definition generation and validation
//!
//! This crate turns a free-text user prompt into a structured form
//! definition and forwards it to an external form-management API. The
//! heart of the crate is the [`validation`] module: generated documents
//! come from an untrusted, non-deterministic text model and nothing is
//! transmitted until it has passed structural and referential checks.
//!
//! # Main Components
//!
//! - **Error Handling**: one `Error` enum with `thiserror`, definitive
//!   rejections distinguished from infrastructure failures
//! - **Types**: trust-tracking wrappers around the JSON document
//!   ([`CandidateDocument`] → [`ValidatedForm`])
//! - **Validation**: the form-definition validator and its error model
//! - **Generator / Client**: thin adapters for the Gemini API and the
//!   form-management API, behind injectable traits
//! - **Service**: the generate → validate → transmit pipeline
//!
//! # Example
//!
//! ```no_run
//! use formgen_core::{Config, FormService, Result};
//!
//! async fn example() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let service = FormService::from_config(&config)?;
//!     let response = service.create_and_submit("a contact form").await?;
//!     println!("{}", response);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod service;
pub mod types;
pub mod validation;

// Re-export main types for convenience
pub use client::{FormApiClient, TransmissionSink};
pub use config::{Config, GeneratorConfig, SinkConfig};
pub use error::{Error, Result};
pub use generator::{FormGenerator, GeminiGenerator};
pub use service::FormService;
pub use types::{CandidateDocument, FieldType, ValidatedForm};
pub use validation::{FormDefinitionValidator, ValidationError, ValidationErrors, Violation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
