use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The organizational setting a brief is written for. Its label is passed to
/// the model verbatim to bias tone and vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BriefContext {
    #[default]
    Freelance,
    School,
    Internal,
    Personal,
}

impl BriefContext {
    pub const ALL: [Self; 4] = [Self::Freelance, Self::School, Self::Internal, Self::Personal];

    /// The label embedded in the prompt.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Freelance => "Freelance Client",
            Self::School => "School Project",
            Self::Internal => "Internal Team",
            Self::Personal => "Personal Project",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Freelance => "💼",
            Self::School => "🎓",
            Self::Internal => "🏢",
            Self::Personal => "🚀",
        }
    }

    /// The short name accepted on the command line.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Freelance => "freelance",
            Self::School => "school",
            Self::Internal => "internal",
            Self::Personal => "personal",
        }
    }
}

impl fmt::Display for BriefContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BriefContext {
    type Err = String;

    /// Accepts either the short key (`school`) or the full label
    /// (`School Project`), case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|context| {
                context.key().eq_ignore_ascii_case(value)
                    || context.label().eq_ignore_ascii_case(value)
            })
            .ok_or_else(|| {
                let keys: Vec<&str> = Self::ALL.iter().map(|c| c.key()).collect();
                format!(
                    "unknown context '{value}', expected one of: {}",
                    keys.join(", ")
                )
            })
    }
}

/// Constraints grouped by category. All three lists are required on the wire,
/// even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Constraints {
    pub technical: Vec<String>,
    pub timeline: Vec<String>,
    pub budget: Vec<String>,
}

/// The structured brief returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredBrief {
    pub summary: String,
    pub objectives: Vec<String>,
    pub target_audience: String,
    pub deliverables: Vec<String>,
    pub constraints: Constraints,
    /// Questions that must be answered before work can start.
    pub ambiguities: Vec<String>,
    pub assumptions: Vec<String>,
    pub risks: Vec<String>,
}
