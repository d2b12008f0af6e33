use crate::{LanguageModelInput, LanguageModelResult, ModelResponse};

/// A model that turns one [`LanguageModelInput`] into one [`ModelResponse`].
///
/// Implementations perform a single request per call: no streaming, no
/// retries.
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    fn provider(&self) -> &'static str;
    fn model_id(&self) -> String;
    async fn generate(&self, input: LanguageModelInput) -> LanguageModelResult<ModelResponse>;
}
