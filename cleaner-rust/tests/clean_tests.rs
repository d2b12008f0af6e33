use brief_cleaner::{
    schema, BriefCleaner, BriefContext, BriefError, Constraints, StructuredBrief,
};
use brief_sdk::{
    brief_sdk_test::{MockGenerateResult, MockLanguageModel},
    LanguageModelError, Message, ModelResponse, ModelUsage, Part,
};
use std::sync::Arc;

const RAW: &str = "i need a website for my sports brand, blue colors, fast, with animations. budget is low.";

const BRIEF_JSON: &str = r#"{
  "summary": "A marketing website for a sports brand.",
  "objectives": ["Showcase the brand"],
  "targetAudience": "Sports enthusiasts",
  "deliverables": ["Responsive website"],
  "constraints": {
    "technical": ["Animations", "Fast load times"],
    "timeline": [],
    "budget": ["Low budget"]
  },
  "ambiguities": ["What is the deadline?"],
  "assumptions": ["Blue color palette"],
  "risks": ["Animations may hurt performance"]
}"#;

fn expected_brief() -> StructuredBrief {
    StructuredBrief {
        summary: "A marketing website for a sports brand.".to_string(),
        objectives: vec!["Showcase the brand".to_string()],
        target_audience: "Sports enthusiasts".to_string(),
        deliverables: vec!["Responsive website".to_string()],
        constraints: Constraints {
            technical: vec!["Animations".to_string(), "Fast load times".to_string()],
            timeline: vec![],
            budget: vec!["Low budget".to_string()],
        },
        ambiguities: vec!["What is the deadline?".to_string()],
        assumptions: vec!["Blue color palette".to_string()],
        risks: vec!["Animations may hurt performance".to_string()],
    }
}

fn cleaner_with(model: &Arc<MockLanguageModel>) -> BriefCleaner {
    BriefCleaner::with_model(model.clone())
}

#[tokio::test]
async fn clean_decodes_model_json() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(ModelResponse {
        content: vec![Part::text(BRIEF_JSON)],
        usage: Some(ModelUsage {
            input_tokens: 120,
            output_tokens: 80,
        }),
    });

    let brief = cleaner_with(&model)
        .clean(RAW, BriefContext::Freelance)
        .await
        .expect("clean succeeds");

    assert_eq!(brief, expected_brief());
}

#[tokio::test]
async fn sends_single_prompt_with_instruction_and_schema() {
    let model = Arc::new(MockLanguageModel::new());
    let cleaner = cleaner_with(&model);

    for context in BriefContext::ALL {
        model.enqueue_generate(MockGenerateResult::text(BRIEF_JSON));
        cleaner.clean(RAW, context).await.expect("clean succeeds");
    }

    let inputs = model.tracked_generate_inputs();
    assert_eq!(inputs.len(), BriefContext::ALL.len());

    for (input, context) in inputs.iter().zip(BriefContext::ALL) {
        assert_eq!(
            input.system_prompt.as_deref(),
            Some(schema::system_instruction())
        );
        assert_eq!(input.response_format, Some(schema::response_format()));

        let [Message::User(user)] = input.messages.as_slice() else {
            panic!("expected exactly one user message");
        };
        let [Part::Text(part)] = user.content.as_slice() else {
            panic!("expected exactly one text part");
        };
        assert!(part.text.contains(&format!("Context: {}", context.label())));
        assert!(part.text.contains(RAW));
    }
}

#[tokio::test]
async fn response_format_carries_the_brief_schema() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(MockGenerateResult::text(BRIEF_JSON));

    cleaner_with(&model)
        .clean(RAW, BriefContext::School)
        .await
        .expect("clean succeeds");

    let input = model.tracked_generate_inputs().remove(0);
    let format = input.response_format.expect("JSON response format is set");
    assert_eq!(format.name, schema::RESPONSE_FORMAT_NAME);

    let json_schema = format.schema.expect("schema is set");
    let required: Vec<&str> = json_schema["required"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(required, schema::REQUIRED_FIELDS);
}

#[tokio::test]
async fn temperature_is_forwarded_to_the_model() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate_results([
        MockGenerateResult::text(BRIEF_JSON),
        MockGenerateResult::text(BRIEF_JSON),
    ]);

    cleaner_with(&model)
        .clean(RAW, BriefContext::Freelance)
        .await
        .expect("clean succeeds");
    cleaner_with(&model)
        .with_temperature(0.2)
        .clean(RAW, BriefContext::Freelance)
        .await
        .expect("clean succeeds");

    let temperatures: Vec<Option<f64>> = model
        .tracked_generate_inputs()
        .into_iter()
        .map(|input| input.temperature)
        .collect();
    assert_eq!(temperatures, vec![None, Some(0.2)]);
}

#[tokio::test]
async fn fenced_json_is_accepted() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(MockGenerateResult::text(format!("```json\n{BRIEF_JSON}\n```")));

    let brief = cleaner_with(&model)
        .clean(RAW, BriefContext::Internal)
        .await
        .expect("clean succeeds");

    assert_eq!(brief, expected_brief());
}

#[tokio::test]
async fn invalid_json_is_a_format_error() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(MockGenerateResult::text("not json"));

    let error = cleaner_with(&model)
        .clean(RAW, BriefContext::Freelance)
        .await
        .unwrap_err();

    assert!(matches!(error, BriefError::Format(_)));
    assert_eq!(
        error.user_message(),
        "The AI generated an invalid format. Please try again."
    );
}

#[tokio::test]
async fn missing_field_is_a_format_error() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(MockGenerateResult::text(
        r#"{"summary": "Only a summary", "objectives": []}"#,
    ));

    let result = cleaner_with(&model)
        .clean(RAW, BriefContext::Personal)
        .await;

    assert!(matches!(result, Err(BriefError::Format(_))));
}

#[tokio::test]
async fn empty_or_missing_text_is_an_empty_response() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate_results([
        MockGenerateResult::text(""),
        MockGenerateResult::text("  \n"),
        MockGenerateResult::response(ModelResponse::default()),
    ]);
    let cleaner = cleaner_with(&model);

    for _ in 0..3 {
        let error = cleaner.clean(RAW, BriefContext::Freelance).await.unwrap_err();
        assert!(matches!(error, BriefError::EmptyResponse));
        assert_eq!(error.user_message(), "No response generated from Gemini.");
    }
}

#[tokio::test]
async fn model_errors_pass_through() {
    let model = Arc::new(MockLanguageModel::new());
    model.enqueue_generate(MockGenerateResult::error(LanguageModelError::Invariant(
        "google",
        "quota exceeded".to_string(),
    )));

    let error = cleaner_with(&model)
        .clean(RAW, BriefContext::Freelance)
        .await
        .unwrap_err();

    assert!(matches!(error, BriefError::Transport(_)));
    assert_eq!(error.user_message(), "Invariant from google: quota exceeded");
}

#[tokio::test]
async fn short_input_makes_no_model_call() {
    let model = Arc::new(MockLanguageModel::new());

    let result = cleaner_with(&model)
        .clean("   short   ", BriefContext::Freelance)
        .await;

    assert!(matches!(result, Err(BriefError::InvalidInput(_))));
    assert!(model.tracked_generate_inputs().is_empty());
}
