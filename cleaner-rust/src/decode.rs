use crate::{BriefError, BriefResult, StructuredBrief};

/// Decode the model's text into a [`StructuredBrief`].
///
/// Every field is required and type-checked: a missing field, a `null` list
/// or a wrong primitive type fails the whole decode with
/// [`BriefError::Format`]. There is no partial result.
pub fn decode_brief(text: &str) -> BriefResult<StructuredBrief> {
    serde_json::from_str(strip_code_fence(text)).map_err(|error| {
        tracing::debug!(%error, bytes = text.len(), "model text is not a structured brief");
        BriefError::Format(error)
    })
}

/// Models occasionally wrap JSON output in a Markdown fence even when a JSON
/// mime type was requested.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, |body| {
            body.trim_start_matches(|c: char| c.is_ascii_alphanumeric())
                .trim()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Constraints;

    const SAMPLE: &str = r#"{"summary":"S","objectives":["a"],"targetAudience":"T","deliverables":["d"],"constraints":{"technical":[],"timeline":[],"budget":[]},"ambiguities":[],"assumptions":[],"risks":[]}"#;

    fn sample_brief() -> StructuredBrief {
        StructuredBrief {
            summary: "S".to_string(),
            objectives: vec!["a".to_string()],
            target_audience: "T".to_string(),
            deliverables: vec!["d".to_string()],
            constraints: Constraints::default(),
            ambiguities: vec![],
            assumptions: vec![],
            risks: vec![],
        }
    }

    #[test]
    fn decodes_complete_document() {
        let brief = decode_brief(SAMPLE).unwrap();

        assert_eq!(brief.summary, "S");
        assert_eq!(brief.objectives, vec!["a".to_string()]);
        assert_eq!(brief, sample_brief());
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(decode_brief("not json"), Err(BriefError::Format(_))));
    }

    #[test]
    fn format_error_uses_fixed_message() {
        let error = decode_brief("not json").unwrap_err();
        assert_eq!(
            error.to_string(),
            "The AI generated an invalid format. Please try again."
        );
    }

    #[test]
    fn rejects_missing_field() {
        let mut value: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        value.as_object_mut().unwrap().remove("risks");

        let result = decode_brief(&value.to_string());
        assert!(matches!(result, Err(BriefError::Format(_))));
    }

    #[test]
    fn rejects_missing_constraint_category() {
        let mut value: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        value["constraints"]
            .as_object_mut()
            .unwrap()
            .remove("budget");

        let result = decode_brief(&value.to_string());
        assert!(matches!(result, Err(BriefError::Format(_))));
    }

    #[test]
    fn rejects_null_list_and_wrong_types() {
        let mut null_list: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        null_list["objectives"] = serde_json::Value::Null;
        assert!(matches!(
            decode_brief(&null_list.to_string()),
            Err(BriefError::Format(_))
        ));

        let mut wrong_type: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        wrong_type["summary"] = serde_json::json!(["not", "a", "string"]);
        assert!(matches!(
            decode_brief(&wrong_type.to_string()),
            Err(BriefError::Format(_))
        ));
    }

    #[test]
    fn accepts_empty_lists_and_extra_fields() {
        let mut value: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        value["objectives"] = serde_json::json!([]);
        value["confidence"] = serde_json::json!(0.9);

        let brief = decode_brief(&value.to_string()).unwrap();
        assert!(brief.objectives.is_empty());
    }

    #[test]
    fn unwraps_markdown_fence() {
        let fenced = format!("```json\n{SAMPLE}\n```");
        assert_eq!(decode_brief(&fenced).unwrap(), sample_brief());

        let bare = format!("  ```\n{SAMPLE}\n```  ");
        assert_eq!(decode_brief(&bare).unwrap(), sample_brief());
    }
}
