//! Validation of generated form-definition documents
//!
//! The generator's output is untrusted; this module is the sole gate
//! between it and the external transmission step. [`FormDefinitionValidator`]
//! enforces the structural rules (required keys, allowed field types) and
//! the two referential invariants downstream consumers depend on: every
//! field's `refKey` links it to its owning section, and a section's layout
//! `sectionKey`, when present, names the section itself.

pub mod context;
pub mod error;
pub mod form_definition;

pub use context::PathContext;
pub use error::{ValidationError, ValidationErrors, Violation};
pub use form_definition::FormDefinitionValidator;
