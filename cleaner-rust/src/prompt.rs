use crate::{schema, BriefContext, BriefError, BriefResult};
use brief_sdk::{LanguageModelInput, Message, Part};

/// Minimum number of characters, after trimming, a raw brief needs before it
/// can be submitted.
pub const MIN_BRIEF_CHARS: usize = 10;

pub const TOO_SHORT_MESSAGE: &str = "Please enter at least 10 characters.";

/// Whether `text` is long enough to submit.
#[must_use]
pub fn is_submittable(text: &str) -> bool {
    text.trim().chars().count() >= MIN_BRIEF_CHARS
}

/// Free-text project description that passed the length gate. The text is
/// kept exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBrief(String);

impl RawBrief {
    pub fn new(text: impl Into<String>) -> BriefResult<Self> {
        let text = text.into();
        if is_submittable(&text) {
            Ok(Self(text))
        } else {
            Err(BriefError::InvalidInput(TOO_SHORT_MESSAGE.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Compose the single prompt sent to the model. The raw text is interpolated
/// as-is.
#[must_use]
pub fn build_prompt(raw: &str, context: BriefContext) -> String {
    format!(
        "Context: {}\n\nRaw Input Brief:\n\"{raw}\"\n\nAnalyze this input and generate a structured brief.",
        context.label()
    )
}

/// One cleaning request: validated raw text plus its context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefRequest {
    pub raw: RawBrief,
    pub context: BriefContext,
}

impl BriefRequest {
    pub fn new(raw: impl Into<String>, context: BriefContext) -> BriefResult<Self> {
        Ok(Self {
            raw: RawBrief::new(raw)?,
            context,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> String {
        build_prompt(self.raw.as_str(), self.context)
    }

    /// The model input: fixed system instruction, one user message, and the
    /// JSON response format.
    #[must_use]
    pub fn to_model_input(&self) -> LanguageModelInput {
        LanguageModelInput {
            system_prompt: Some(schema::system_instruction().to_string()),
            messages: vec![Message::user(vec![Part::text(self.prompt())])],
            response_format: Some(schema::response_format()),
            ..Default::default()
        }
    }
}
