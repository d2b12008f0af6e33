use crate::{
    config::{Settings, API_KEY_VAR},
    decode::decode_brief,
    BriefContext, BriefError, BriefRequest, BriefResult, StructuredBrief,
};
use brief_sdk::{
    google::{GoogleModel, GoogleModelOptions},
    LanguageModel,
};
use std::sync::Arc;

enum ModelSource {
    /// Build a Gemini model from settings on every call.
    Google(Settings),
    Custom(Arc<dyn LanguageModel>),
}

/// Turns raw briefs into [`StructuredBrief`]s with one model call each.
pub struct BriefCleaner {
    source: ModelSource,
    temperature: Option<f64>,
}

impl BriefCleaner {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            temperature: settings.temperature,
            source: ModelSource::Google(settings),
        }
    }

    /// Use a specific model instead of Gemini. No credential check is done.
    #[must_use]
    pub fn with_model(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            source: ModelSource::Custom(model),
            temperature: None,
        }
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(Settings::from_env())
    }

    fn resolve_model(&self) -> BriefResult<Arc<dyn LanguageModel>> {
        match &self.source {
            ModelSource::Custom(model) => Ok(model.clone()),
            ModelSource::Google(settings) => {
                let api_key = settings
                    .api_key
                    .as_deref()
                    .filter(|key| !key.trim().is_empty())
                    .ok_or_else(|| {
                        BriefError::Configuration(format!(
                            "{API_KEY_VAR} environment variable is missing."
                        ))
                    })?;

                Ok(Arc::new(GoogleModel::new(
                    settings.model_id.clone(),
                    GoogleModelOptions {
                        api_key: api_key.to_string(),
                        base_url: settings.base_url.clone(),
                    },
                )))
            }
        }
    }

    /// Clean `raw` for `context`. Validates the input first.
    pub async fn clean(&self, raw: &str, context: BriefContext) -> BriefResult<StructuredBrief> {
        let request = BriefRequest::new(raw, context)?;
        self.clean_request(&request).await
    }

    /// Run one already-validated request: resolve the model, generate once,
    /// decode the text.
    pub async fn clean_request(&self, request: &BriefRequest) -> BriefResult<StructuredBrief> {
        let model = self.resolve_model()?;

        tracing::info!(
            provider = model.provider(),
            model = %model.model_id(),
            context = request.context.label(),
            "requesting structured brief"
        );

        let mut input = request.to_model_input();
        input.temperature = self.temperature;

        let response = model.generate(input).await?;

        if let Some(usage) = &response.usage {
            tracing::debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "model usage"
            );
        }

        let text = response
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or(BriefError::EmptyResponse)?;

        decode_brief(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_credential_fails_before_building_a_model() {
        let cleaner = BriefCleaner::new(Settings::default());

        let error = cleaner
            .clean("A website for my bakery, ready by spring.", BriefContext::Personal)
            .await
            .unwrap_err();

        match error {
            BriefError::Configuration(message) => {
                assert_eq!(message, "API_KEY environment variable is missing.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn blank_credential_counts_as_missing() {
        let cleaner = BriefCleaner::new(Settings::default().with_api_key("   "));

        let result = cleaner
            .clean("A website for my bakery, ready by spring.", BriefContext::Personal)
            .await;

        assert!(matches!(result, Err(BriefError::Configuration(_))));
    }

    #[tokio::test]
    async fn short_input_is_rejected_before_credential_check() {
        let cleaner = BriefCleaner::new(Settings::default());

        let result = cleaner.clean("too short", BriefContext::School).await;

        assert!(matches!(result, Err(BriefError::InvalidInput(_))));
    }

    #[test]
    fn temperature_comes_from_settings() {
        let cleaner = BriefCleaner::new(Settings::default().with_temperature(0.4));
        assert_eq!(cleaner.temperature, Some(0.4));

        assert_eq!(BriefCleaner::new(Settings::default()).temperature, None);
    }
}
