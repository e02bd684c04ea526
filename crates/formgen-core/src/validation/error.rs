//! Validation error types for form-definition documents

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single rule violation with enough context to diagnose it without
/// re-inspecting the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The validation rule that was violated
    pub rule: String,
    /// What was expected
    pub expected: String,
    /// What was actually found
    pub actual: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule '{}': expected {}, found {}",
            self.rule, self.expected, self.actual
        )
    }
}

/// A validation failure at one location in the document
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON path where the error occurred
    pub path: String,
    /// Human-readable error message
    pub message: String,
    /// Structured rule violations backing the message
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at '{}': {}", self.path, self.message)?;
        for violation in &self.violations {
            write!(f, " ({})", violation)?;
        }
        Ok(())
    }
}

impl ValidationError {
    /// Create a validation error without structured violations
    pub fn new<P, M>(path: P, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            path: path.into(),
            message: message.into(),
            violations: Vec::new(),
        }
    }

    /// Create a validation error carrying structured violations
    pub fn with_violation<P, M>(path: P, message: M, violation: Violation) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            path: path.into(),
            message: message.into(),
            violations: vec![violation],
        }
    }

    /// Build a violation for a specific rule
    pub fn violation<R, E, A>(rule: R, expected: E, actual: A) -> Violation
    where
        R: Into<String>,
        E: Into<String>,
        A: Into<String>,
    {
        Violation {
            rule: rule.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Every violation found in one validation pass, in detection order.
///
/// The walk visits the document in a fixed order, so the first entry is
/// always the earliest-detected problem.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "no violations"),
            1 => write!(f, "{}", self.errors[0]),
            n => {
                write!(f, "{} violations:", n)?;
                for (i, error) in self.errors.iter().enumerate() {
                    write!(f, " [{}] {};", i + 1, error)?;
                }
                Ok(())
            }
        }
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The earliest-detected violation, if any
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Ok if no errors were collected, Err carrying the collection otherwise
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Default for ValidationErrors {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self { errors: vec![error] }
    }
}
