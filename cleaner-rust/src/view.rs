//! View state for one brief-cleaning screen and its plain-text rendering.

use crate::{BriefCleaner, BriefContext, BriefError, BriefRequest, BriefResult, StructuredBrief};
use std::fmt::Write as _;

pub const IN_FLIGHT_MESSAGE: &str = "A brief is already being processed.";
const NONE_IDENTIFIED: &str = "None identified.";

/// Which view is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// The view state. A result only exists in `Success` and a message only in
/// `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Success(StructuredBrief),
    Error(String),
}

impl ViewState {
    #[must_use]
    pub fn status(&self) -> ProcessingStatus {
        match self {
            Self::Idle => ProcessingStatus::Idle,
            Self::Loading => ProcessingStatus::Loading,
            Self::Success(_) => ProcessingStatus::Success,
            Self::Error(_) => ProcessingStatus::Error,
        }
    }

    #[must_use]
    pub fn brief(&self) -> Option<&StructuredBrief> {
        match self {
            Self::Success(brief) => Some(brief),
            _ => None,
        }
    }
}

/// Input and state of a single cleaning screen.
///
/// `Loading` is only reachable through [`BriefSession::begin_submit`], and
/// `Success`/`Error` only through [`BriefSession::settle`] while loading.
#[derive(Debug, Clone, Default)]
pub struct BriefSession {
    raw_text: String,
    context: BriefContext,
    state: ViewState,
}

impl BriefSession {
    #[must_use]
    pub fn new(raw_text: impl Into<String>, context: BriefContext) -> Self {
        Self {
            raw_text: raw_text.into(),
            context,
            state: ViewState::Idle,
        }
    }

    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn set_raw_text(&mut self, raw_text: impl Into<String>) {
        self.raw_text = raw_text.into();
    }

    #[must_use]
    pub fn context(&self) -> BriefContext {
        self.context
    }

    pub fn set_context(&mut self, context: BriefContext) {
        self.context = context;
    }

    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> ProcessingStatus {
        self.state.status()
    }

    /// The submit action is disabled for short input or while a request is in
    /// flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        crate::prompt::is_submittable(&self.raw_text) && self.state != ViewState::Loading
    }

    /// Hint shown under the input when it is non-empty but too short.
    #[must_use]
    pub fn input_hint(&self) -> Option<&'static str> {
        let len = self.raw_text.trim().chars().count();
        (len > 0 && len < crate::prompt::MIN_BRIEF_CHARS).then_some(crate::prompt::TOO_SHORT_MESSAGE)
    }

    /// Enter `Loading`, clearing any previous result or error, and return the
    /// request to run.
    pub fn begin_submit(&mut self) -> BriefResult<BriefRequest> {
        if self.state == ViewState::Loading {
            return Err(BriefError::InvalidInput(IN_FLIGHT_MESSAGE.to_string()));
        }
        let request = BriefRequest::new(self.raw_text.clone(), self.context)?;
        self.state = ViewState::Loading;
        Ok(request)
    }

    /// Apply the outcome of the in-flight request. Returns `false`, leaving the
    /// state untouched, when nothing is loading.
    pub fn settle(&mut self, result: BriefResult<StructuredBrief>) -> bool {
        if self.state != ViewState::Loading {
            tracing::warn!(status = ?self.status(), "ignoring result with no request in flight");
            return false;
        }

        self.state = match result {
            Ok(brief) => ViewState::Success(brief),
            Err(error) => {
                tracing::error!(%error, "failed to clean brief");
                ViewState::Error(error.user_message())
            }
        };
        true
    }

    /// Submit the current input and wait for the single model call to settle.
    /// Rejected submissions leave the state unchanged.
    pub async fn submit(&mut self, cleaner: &BriefCleaner) -> BriefResult<&ViewState> {
        let request = self.begin_submit()?;
        let result = cleaner.clean_request(&request).await;
        self.settle(result);
        Ok(&self.state)
    }
}

fn push_list(out: &mut String, items: &[String], indent: usize) {
    let pad = " ".repeat(indent);
    if items.is_empty() {
        let _ = writeln!(out, "{pad}{NONE_IDENTIFIED}");
    }
    for item in items {
        let _ = writeln!(out, "{pad}• {item}");
    }
}

/// Render the result view of a brief.
#[must_use]
pub fn render_brief(brief: &StructuredBrief) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Executive Summary\n  {}\n", brief.summary);

    out.push_str("Objectives\n");
    push_list(&mut out, &brief.objectives, 2);

    let _ = writeln!(out, "\nTarget Audience\n  {}\n", brief.target_audience);

    out.push_str("Deliverables\n");
    push_list(&mut out, &brief.deliverables, 2);

    out.push_str("\nConstraints\n  Technical\n");
    push_list(&mut out, &brief.constraints.technical, 4);
    out.push_str("  Timeline\n");
    push_list(&mut out, &brief.constraints.timeline, 4);
    out.push_str("  Budget\n");
    push_list(&mut out, &brief.constraints.budget, 4);

    out.push_str("\nAmbiguities (Ask Client)\n");
    push_list(&mut out, &brief.ambiguities, 2);

    out.push_str("\nAssumptions Taken\n");
    push_list(&mut out, &brief.assumptions, 2);

    out.push_str("\nPotential Risks\n");
    push_list(&mut out, &brief.risks, 2);

    out
}

/// Render whichever view the state selects.
#[must_use]
pub fn render_view(state: &ViewState) -> String {
    match state {
        ViewState::Idle => "Ready to clean\n\
             Paste your project notes and run \"Clean Brief\" to get a structured brief.\n"
            .to_string(),
        ViewState::Loading => {
            "Analyzing requirements...\nIdentifying ambiguities & technical needs\n".to_string()
        }
        ViewState::Success(brief) => render_brief(brief),
        ViewState::Error(message) => format!("Error: {message}\n"),
    }
}
