//! Document generation from natural-language prompts
//!
//! A [`FormGenerator`] turns a free-text description into a candidate
//! form-definition document. The production implementation talks to the
//! Gemini REST API; tests substitute their own implementations, which is
//! why the seam is a trait rather than a concrete client.

pub mod gemini;
pub mod prompt;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::CandidateDocument;

/// External, non-deterministic source of candidate form definitions.
///
/// Implementations make no promise about well-formedness; every candidate
/// goes through the validator before it is trusted.
#[async_trait]
pub trait FormGenerator: Send + Sync {
    /// Produce a candidate document for the given user description
    async fn generate(&self, prompt: &str) -> Result<CandidateDocument>;
}

pub use gemini::GeminiGenerator;
pub use prompt::render_instructions;
