use thiserror::Error;

pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "An unexpected error occurred while processing the brief.";

#[derive(Debug, Error)]
pub enum BriefError {
    /// The credential needed to reach the model is not configured.
    #[error("{0}")]
    Configuration(String),
    /// The model call completed without producing any text.
    #[error("No response generated from Gemini.")]
    EmptyResponse,
    /// The model produced text that does not decode into a structured brief.
    #[error("The AI generated an invalid format. Please try again.")]
    Format(#[source] serde_json::Error),
    #[error("{0}")]
    Transport(#[from] brief_sdk::LanguageModelError),
    /// The submission was rejected before any request was made.
    #[error("{0}")]
    InvalidInput(String),
}

impl BriefError {
    /// The message shown in the error banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNEXPECTED_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

pub type BriefResult<T> = Result<T, BriefError>;
