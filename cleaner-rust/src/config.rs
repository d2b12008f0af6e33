use std::env;

pub const API_KEY_VAR: &str = "API_KEY";
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const MODEL_VAR: &str = "BRIEFCLEANER_MODEL";
pub const BASE_URL_VAR: &str = "BRIEFCLEANER_BASE_URL";
pub const TEMPERATURE_VAR: &str = "BRIEFCLEANER_TEMPERATURE";

pub const DEFAULT_MODEL_ID: &str = "gemini-3-flash-preview";

/// Runtime settings for reaching the model.
///
/// The credential stays optional here: its absence is reported when a brief
/// is cleaned, not when settings are loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub model_id: String,
    /// Overrides the Gemini endpoint, e.g. for a proxy.
    pub base_url: Option<String>,
    /// Sampling temperature. The model default applies when unset.
    pub temperature: Option<f64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            base_url: None,
            temperature: None,
        }
    }
}

impl Settings {
    /// Load settings from the process environment, reading a `.env` file first
    /// when one exists.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup. Blank values count as
    /// unset, and a temperature that is not a number is ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            api_key: non_blank(API_KEY_VAR).or_else(|| non_blank(GOOGLE_API_KEY_VAR)),
            model_id: non_blank(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            base_url: non_blank(BASE_URL_VAR),
            temperature: non_blank(TEMPERATURE_VAR).and_then(|value| {
                value
                    .trim()
                    .parse()
                    .inspect_err(|error| {
                        tracing::warn!(%error, %value, "ignoring {TEMPERATURE_VAR}");
                    })
                    .ok()
            }),
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}
