//! Structural and referential validation of generated form definitions
//!
//! The generator is an external, non-deterministic text model; nothing it
//! produces is trusted until it has been through [`FormDefinitionValidator`].
//! The validator walks the candidate document top-down and checks, in order:
//!
//! 1. the document is a JSON object,
//! 2. the top-level keys `form` and `formVersion` are present,
//! 3. `formVersion.formGroups` is present and an array,
//! 4. every section has a `refKey` and a `fields` array,
//! 5. every field has an allowed `fieldType` and a `refKey` equal to its
//!    owning section's `refKey`,
//! 6. a section's `configurations.layout.sectionKey`, when present, equals
//!    that section's own `refKey`.
//!
//! Violations are accumulated over the whole walk rather than aborting at
//! the first one; the first collected error is always the earliest-detected
//! problem. The walk only stops descending below a container whose absence
//! or wrong shape makes the checks beneath it meaningless (a non-object
//! document, a missing `formGroups`, a section without a `fields` array).

use std::collections::HashSet;

use serde_json::Value;
use tracing::warn;

use crate::types::{CandidateDocument, FieldType, ValidatedForm};
use crate::validation::context::PathContext;
use crate::validation::error::{ValidationError, ValidationErrors};

/// Fallback used when a section or field has no usable `name`
const UNNAMED: &str = "unnamed";

/// Validator for generated form-definition documents.
///
/// Stateless: the set of seen section keys is local to one `validate`
/// call, so concurrent and repeated validations are independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormDefinitionValidator;

impl FormDefinitionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a candidate document, yielding a [`ValidatedForm`] that
    /// carries the document unmodified, or every violation found.
    pub fn validate(
        &self,
        candidate: CandidateDocument,
    ) -> Result<ValidatedForm, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.check_document(candidate.as_value(), &mut errors);
        if !errors.is_empty() {
            warn!(violations = errors.len(), "form definition rejected: {}", errors);
            return Err(errors);
        }
        Ok(ValidatedForm::new(candidate.into_value()))
    }

    fn check_document(&self, document: &Value, errors: &mut ValidationErrors) {
        let ctx = PathContext::root();

        let Some(root) = document.as_object() else {
            errors.add(ValidationError::with_violation(
                ctx.path(),
                "document is not a JSON object",
                ValidationError::violation("document_shape", "a JSON object", type_name(document)),
            ));
            return;
        };

        for key in ["form", "formVersion"] {
            if !root.contains_key(key) {
                errors.add(ValidationError::with_violation(
                    ctx.path(),
                    format!("missing field '{}'", key),
                    ValidationError::violation("required_key", format!("key '{}'", key), "absent"),
                ));
            }
        }

        let Some(form_version) = root.get("formVersion") else {
            return;
        };
        let version_ctx = ctx.child("formVersion");

        let Some(groups) = form_version.get("formGroups") else {
            errors.add(ValidationError::with_violation(
                version_ctx.path(),
                "formVersion must contain 'formGroups' array",
                ValidationError::violation("required_key", "key 'formGroups'", "absent"),
            ));
            return;
        };
        let groups_ctx = version_ctx.child("formGroups");
        let Some(groups) = groups.as_array() else {
            errors.add(ValidationError::with_violation(
                groups_ctx.path(),
                "'formGroups' is not an array",
                ValidationError::violation("container_shape", "an array", type_name(groups)),
            ));
            return;
        };

        // Section keys are collected per call; duplicates across sections
        // are currently tolerated.
        let mut seen_section_keys: HashSet<String> = HashSet::new();

        for (index, group) in groups.iter().enumerate() {
            let group_ctx = groups_ctx.child_index(index);
            self.check_section(group, &group_ctx, &mut seen_section_keys, errors);
        }
    }

    fn check_section(
        &self,
        group: &Value,
        ctx: &PathContext,
        seen_section_keys: &mut HashSet<String>,
        errors: &mut ValidationErrors,
    ) {
        if !group.is_object() {
            errors.add(ValidationError::with_violation(
                ctx.path(),
                "formGroup is not an object",
                ValidationError::violation("container_shape", "a JSON object", type_name(group)),
            ));
            return;
        }
        let section_name = name_of(group);

        let section_key = match group.get("refKey") {
            Some(Value::String(key)) => {
                seen_section_keys.insert(key.clone());
                Some(key.as_str())
            }
            other => {
                errors.add(ValidationError::with_violation(
                    ctx.path(),
                    format!("section '{}' missing refKey", section_name),
                    ValidationError::violation(
                        "section_ref_key",
                        "a string refKey",
                        other.map_or("absent", type_name),
                    ),
                ));
                None
            }
        };

        match group.get("fields").and_then(Value::as_array) {
            Some(fields) => {
                let fields_ctx = ctx.child("fields");
                for (index, field) in fields.iter().enumerate() {
                    let field_ctx = fields_ctx.child_index(index);
                    self.check_field(field, &field_ctx, section_key, errors);
                }
            }
            None => {
                errors.add(ValidationError::with_violation(
                    ctx.path(),
                    format!("formGroup '{}' missing fields array", section_name),
                    ValidationError::violation("fields_present", "a 'fields' array", "absent"),
                ));
            }
        }

        self.check_layout(group, ctx, &section_name, section_key, errors);
    }

    fn check_field(
        &self,
        field: &Value,
        ctx: &PathContext,
        section_key: Option<&str>,
        errors: &mut ValidationErrors,
    ) {
        let field_name = name_of(field);

        let field_type = field.get("fieldType");
        let type_str = field_type.and_then(Value::as_str);
        let is_allowed = type_str
            .map(|t| t.parse::<FieldType>().is_ok())
            .unwrap_or(false);
        if !is_allowed {
            let actual = match (field_type, type_str) {
                (None, _) => "absent",
                (Some(value), None) => type_name(value),
                (_, Some(name)) => name,
            };
            errors.add(ValidationError::with_violation(
                ctx.child("fieldType").path(),
                format!("invalid field type: {}", actual),
                ValidationError::violation("field_type", allowed_field_types(), actual),
            ));
        }

        match field.get("refKey") {
            Some(Value::String(field_key)) => {
                if let Some(section_key) = section_key {
                    if field_key != section_key {
                        errors.add(ValidationError::with_violation(
                            ctx.child("refKey").path(),
                            format!(
                                "field '{}' has refKey '{}' that doesn't match its section refKey '{}'",
                                field_name, field_key, section_key
                            ),
                            ValidationError::violation(
                                "field_section_link",
                                format!("refKey '{}'", section_key),
                                format!("refKey '{}'", field_key),
                            ),
                        ));
                    }
                }
            }
            other => {
                errors.add(ValidationError::with_violation(
                    ctx.path(),
                    format!("field '{}' missing refKey", field_name),
                    ValidationError::violation(
                        "field_ref_key",
                        "a string refKey",
                        other.map_or("absent", type_name),
                    ),
                ));
            }
        }
    }

    fn check_layout(
        &self,
        group: &Value,
        ctx: &PathContext,
        section_name: &str,
        section_key: Option<&str>,
        errors: &mut ValidationErrors,
    ) {
        let Some(layout_key) = group
            .get("configurations")
            .and_then(|c| c.get("layout"))
            .and_then(|l| l.get("sectionKey"))
        else {
            return;
        };

        // Presence alone triggers the check; a non-string sectionKey can
        // never equal the section's refKey.
        let matches = layout_key.as_str().is_some() && layout_key.as_str() == section_key;
        if !matches {
            let actual = match layout_key.as_str() {
                Some(key) => format!("sectionKey '{}'", key),
                None => format!("sectionKey that is {}", type_name(layout_key)),
            };
            errors.add(ValidationError::with_violation(
                ctx.child("configurations").child("layout").child("sectionKey").path(),
                format!(
                    "section '{}' has mismatched sectionKey in layout configuration",
                    section_name
                ),
                ValidationError::violation(
                    "layout_section_key",
                    format!("sectionKey '{}'", section_key.unwrap_or("absent")),
                    actual,
                ),
            ));
        }
    }
}

fn name_of(value: &Value) -> String {
    value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(UNNAMED)
        .to_string()
}

fn allowed_field_types() -> String {
    let names: Vec<&str> = FieldType::ALL.iter().map(FieldType::as_str).collect();
    format!("one of [{}]", names.join(", "))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
