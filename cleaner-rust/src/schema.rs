//! The fixed instruction and output schema sent with every request.
//!
//! The schema is the contract [`crate::decode`] relies on: a field added or
//! renamed here must be mirrored on [`crate::StructuredBrief`].

use brief_sdk::ResponseFormatJson;
use serde_json::{json, Value};

const SYSTEM_INSTRUCTION: &str = r#"You are an expert Senior Product Manager and Lead Developer called "BriefCleaner".
Your goal is to take a vague, messy, or unstructured text input describing a project and transform it into a professional, structured project brief.

Your output must be strictly structured.
Follow these rules:
1. **Reformulate**: Do not invent core features, but translate vague terms (e.g., "pop effect") into technical possibilities (e.g., "CSS animations").
2. **Ambiguities**: This is the most important section. Identify EVERYTHING that is missing to start working effectively (budget, tech stack specifics, deadlines).
3. **Tone**: Maintain a professional, neutral, and clear tone.
4. **Context**: Adapt the vocabulary slightly based on the context provided (e.g., School = educational focus, Freelance = budget/ROI focus), but keep the structure consistent.
"#;

/// Top-level fields every response must carry, in schema order.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "summary",
    "objectives",
    "targetAudience",
    "deliverables",
    "constraints",
    "ambiguities",
    "assumptions",
    "risks",
];

/// Sub-categories of `constraints`, all required.
pub const CONSTRAINT_FIELDS: [&str; 3] = ["technical", "timeline", "budget"];

pub const RESPONSE_FORMAT_NAME: &str = "structured_brief";

#[must_use]
pub fn system_instruction() -> &'static str {
    SYSTEM_INSTRUCTION
}

fn string_list(description: Option<&str>) -> Value {
    let mut schema = json!({ "type": "array", "items": { "type": "string" } });
    if let Some(description) = description {
        schema["description"] = Value::String(description.to_string());
    }
    schema
}

/// JSON schema describing [`crate::StructuredBrief`].
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": {
                "type": "string",
                "description": "A clear 3-4 line summary of the project."
            },
            "objectives": string_list(Some("Concise list of main goals.")),
            "targetAudience": {
                "type": "string",
                "description": "Description of the target users."
            },
            "deliverables": string_list(Some("Concrete items to be delivered.")),
            "constraints": {
                "type": "object",
                "properties": {
                    "technical": string_list(None),
                    "timeline": string_list(None),
                    "budget": string_list(None)
                },
                "required": CONSTRAINT_FIELDS
            },
            "ambiguities": string_list(Some("Crucial questions that must be answered to proceed.")),
            "assumptions": string_list(Some("Sensible defaults taken due to missing info.")),
            "risks": string_list(Some(
                "Potential project risks (scope creep, unrealistic timeline)."
            ))
        },
        "required": REQUIRED_FIELDS
    })
}

#[must_use]
pub fn response_format() -> ResponseFormatJson {
    ResponseFormatJson {
        name: RESPONSE_FORMAT_NAME.to_string(),
        description: Some(
            "A structured project brief with summary, objectives, audience, deliverables, \
             constraints, ambiguities, assumptions and risks."
                .to_string(),
        ),
        schema: Some(response_schema()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StructuredBrief;

    #[test]
    fn schema_requires_every_brief_field() {
        let schema = response_schema();
        let properties = schema["properties"].as_object().unwrap();

        assert_eq!(schema["required"], json!(REQUIRED_FIELDS));
        for field in REQUIRED_FIELDS {
            assert!(properties.contains_key(field), "missing property {field}");
        }
        assert_eq!(
            schema["properties"]["constraints"]["required"],
            json!(CONSTRAINT_FIELDS)
        );
    }

    #[test]
    fn schema_matches_decoded_shape() {
        let encoded = serde_json::to_value(StructuredBrief::default()).unwrap();
        let mut keys: Vec<&str> = encoded
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();

        let mut expected = REQUIRED_FIELDS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn list_fields_are_string_arrays() {
        let schema = response_schema();
        for field in ["objectives", "deliverables", "ambiguities", "assumptions", "risks"] {
            assert_eq!(schema["properties"][field]["type"], "array");
            assert_eq!(schema["properties"][field]["items"]["type"], "string");
        }
    }

    #[test]
    fn instruction_names_the_transformation_rules() {
        let instruction = system_instruction();
        for rule in ["Reformulate", "Ambiguities", "Tone", "Context"] {
            assert!(instruction.contains(rule), "missing rule {rule}");
        }
    }
}
