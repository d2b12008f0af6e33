use super::api::{
    Candidate, Content, GenerateContentConfig, GenerateContentParameters,
    GenerateContentResponse, GenerateContentResponseUsageMetadata, Part as GooglePart,
};
use crate::{
    client_utils, LanguageModel, LanguageModelError, LanguageModelInput, LanguageModelResult,
    Message, ModelResponse, ModelUsage, Part,
};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};

const PROVIDER: &str = "google";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GoogleModel {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Clone, Default)]
pub struct GoogleModelOptions {
    pub api_key: String,
    pub base_url: Option<String>,
}

impl GoogleModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: GoogleModelOptions) -> Self {
        let GoogleModelOptions { api_key, base_url } = options;

        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            model_id: model_id.into(),
            api_key,
            base_url,
            client: Client::new(),
        }
    }

    /// The key travels in a header so it never appears in request URLs, and
    /// therefore never in transport error messages.
    fn request_headers(&self) -> LanguageModelResult<HeaderMap> {
        let mut api_key = HeaderValue::from_str(&self.api_key).map_err(|_| {
            LanguageModelError::InvalidInput(
                "Google API key contains characters not allowed in a header".to_string(),
            )
        })?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl LanguageModel for GoogleModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(&self, input: LanguageModelInput) -> LanguageModelResult<ModelResponse> {
        crate::opentelemetry::trace_generate(
            self.provider(),
            &self.model_id(),
            input,
            |input| async move {
                let params = convert_to_generate_content_parameters(input, &self.model_id)?;

                let url = format!("{}/models/{}:generateContent", self.base_url, self.model_id);

                let headers = self.request_headers()?;
                let response: GenerateContentResponse =
                    client_utils::send_json(&self.client, &url, &params, headers).await?;

                Ok(map_google_response(response))
            },
        )
        .await
    }
}

fn convert_to_generate_content_parameters(
    input: LanguageModelInput,
    model_id: &str,
) -> LanguageModelResult<GenerateContentParameters> {
    let messages = convert_to_google_contents(input.messages)?;

    let mut params = GenerateContentParameters {
        contents: messages,
        model: model_id.to_string(),
        ..Default::default()
    };

    if let Some(system_prompt) = input.system_prompt {
        params.system_instruction = Some(Content {
            role: Some("system".to_string()),
            parts: Some(vec![GooglePart {
                text: Some(system_prompt),
                ..Default::default()
            }]),
        });
    }

    let mut config = GenerateContentConfig {
        temperature: input.temperature,
        ..Default::default()
    };

    if let Some(response_format) = input.response_format {
        config.response_mime_type = Some("application/json".to_string());
        config.response_json_schema = response_format.schema;
    }

    if config != GenerateContentConfig::default() {
        params.generation_config = Some(config);
    }

    Ok(params)
}

fn convert_to_google_contents(messages: Vec<Message>) -> LanguageModelResult<Vec<Content>> {
    if messages.is_empty() {
        return Err(LanguageModelError::InvalidInput(
            "At least one message is required".to_string(),
        ));
    }

    Ok(messages
        .into_iter()
        .map(|message| match message {
            Message::User(user_message) => Content {
                role: Some("user".to_string()),
                parts: Some(
                    user_message
                        .content
                        .into_iter()
                        .map(convert_to_google_part)
                        .collect(),
                ),
            },
        })
        .collect())
}

fn convert_to_google_part(part: Part) -> GooglePart {
    match part {
        Part::Text(text_part) => GooglePart {
            text: Some(text_part.text),
            ..Default::default()
        },
    }
}

/// A response without candidates (e.g. a blocked prompt) maps to empty
/// content so callers can decide how to report the missing text.
fn map_google_response(response: GenerateContentResponse) -> ModelResponse {
    let candidate = response.candidates.and_then(|c| c.into_iter().next());

    match &candidate {
        None => {
            let block_reason = response
                .prompt_feedback
                .as_ref()
                .and_then(|feedback| feedback.block_reason.as_deref())
                .unwrap_or("unknown");
            tracing::warn!(block_reason, "google returned no candidates");
        }
        Some(Candidate {
            finish_reason: Some(reason),
            ..
        }) if reason != "STOP" => {
            tracing::warn!(finish_reason = %reason, "google stopped before a natural end");
        }
        Some(_) => {}
    }

    let content = map_google_content(
        candidate
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .unwrap_or_default(),
    );

    let usage = response.usage_metadata.as_ref().map(map_google_usage_metadata);

    ModelResponse { content, usage }
}

fn map_google_content(parts: Vec<GooglePart>) -> Vec<Part> {
    parts
        .into_iter()
        .filter(|part| !part.thought.unwrap_or(false))
        .filter_map(|part| part.text)
        .map(Part::text)
        .collect()
}

fn map_google_usage_metadata(usage: &GenerateContentResponseUsageMetadata) -> ModelUsage {
    ModelUsage {
        input_tokens: usage.prompt_token_count.unwrap_or(0),
        output_tokens: usage.candidates_token_count.unwrap_or(0),
    }
}
