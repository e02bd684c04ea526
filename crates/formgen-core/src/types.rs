//! Core types for form-definition documents
//!
//! A form definition is a nested JSON document (form → sections → fields)
//! produced by an untrusted external generator. The types here track how
//! far a given document has made it through the trust pipeline: raw model
//! text becomes a [`CandidateDocument`] once it parses as JSON, and a
//! [`ValidatedForm`] once the validator has accepted it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The set of field types a generated form may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    TextArea,
    Currency,
    Dropdown,
    Radio,
    Checkbox,
}

impl FieldType {
    /// All allowed field types, in declaration order
    pub const ALL: [FieldType; 6] = [
        FieldType::Text,
        FieldType::TextArea,
        FieldType::Currency,
        FieldType::Dropdown,
        FieldType::Radio,
        FieldType::Checkbox,
    ];

    /// The wire name of this field type (snake_case, as it appears
    /// in the document's `fieldType` attribute)
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::TextArea => "text_area",
            FieldType::Currency => "currency",
            FieldType::Dropdown => "dropdown",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FieldType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// A generator output that parsed as JSON but has not been validated.
///
/// This is the only way raw model text enters the pipeline: either it
/// parses and becomes a `CandidateDocument`, or parsing fails with
/// [`Error::MalformedOutput`]. Downstream code never sees raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateDocument(Value);

impl CandidateDocument {
    /// Parse raw generator output into a candidate document
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|e| Error::MalformedOutput {
            detail: format!("generator output is not valid JSON: {}", e),
            source: Some(e),
        })?;
        Ok(Self(value))
    }

    /// Wrap an already-parsed JSON value
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// The underlying JSON value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the candidate, yielding the underlying JSON value
    pub fn into_value(self) -> Value {
        self.0
    }
}

/// A form definition that has passed validation.
///
/// Constructible only by the validator (via `pub(crate)`), so a payload
/// reaching the transmission sink is well-formed by construction. The
/// document inside is the candidate's JSON, unmodified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedForm(Value);

impl ValidatedForm {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    /// The validated document, as it will be transmitted
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}
