//! Instruction template for the form-generation model
//!
//! The template pins down the exact document schema the model must emit,
//! the allowed field types, and the refKey-linking rules the validator
//! will later enforce. Keeping the instructions and the validator's rules
//! in one crate is deliberate: when one changes, the other is in view.

use crate::types::FieldType;

const TEMPLATE: &str = r#"You are a helpful assistant that generates form structures based on user descriptions.
Your response must be a valid JSON object and nothing else - no explanations or additional text.
Generate a JSON form template based on this request: {user_description}

Requirements:
1. Follow the exact schema structure below
2. Field types must be one of: [{field_types}]
3. Each field must have proper validations
4. Generate meaningful descriptions for form, sections, and fields
5. IMPORTANT: Each section must have a unique refKey (e.g., "section_1", "personal_info", etc.)
6. IMPORTANT: Each field's refKey must match its parent section's refKey to create the link
7. If a section's layout configuration carries a sectionKey, it must equal that section's refKey
8. Use logical sequences for sections and fields

Schema template with example refKey linking:
{
    "form": {
        "name": "string",
        "description": "string",
        "status": "draft",
        "type": "bpmnusertask"
    },
    "formVersion": {
        "formId": "string",
        "version": 1,
        "formGroups": [
            {
                "name": "Personal Information",
                "description": "Basic personal details",
                "sequence": 1,
                "type": "section",
                "refKey": "personal_info",
                "configurations": {
                    "basicConfig": {
                        "label": "Personal Information",
                        "hidelabel": false,
                        "hidefield": false,
                        "collapseUi": false,
                        "byDefaultOpen": true
                    },
                    "layout": {
                        "column": 1,
                        "sectionKey": "personal_info"
                    }
                },
                "fields": [
                    {
                        "fieldTypeId": "name_field",
                        "name": "Full Name",
                        "description": "Enter your full name",
                        "configurations": {
                            "basicConfig": {
                                "label": "Full Name",
                                "placeholder": "John Doe",
                                "key": "full_name"
                            },
                            "validations": {
                                "required": "yes",
                                "reqErrorMsg": "Name is required",
                                "valueType": "string",
                                "min": 2,
                                "max": 100
                            },
                            "layout": {
                                "column": 1,
                                "ref_key": "personal_info"
                            }
                        },
                        "sequence": 1,
                        "fieldType": "text",
                        "refKey": "personal_info"
                    }
                ]
            }
        ]
    }
}

Return only valid JSON without any additional text or explanations."#;

/// Render the full instruction text for one user description
pub fn render_instructions(user_description: &str) -> String {
    let field_types: Vec<String> = FieldType::ALL
        .iter()
        .map(|t| format!("'{}'", t.as_str()))
        .collect();
    TEMPLATE
        .replace("{field_types}", &field_types.join(", "))
        .replace("{user_description}", user_description)
}
