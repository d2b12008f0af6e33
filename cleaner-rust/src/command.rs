//! The `clean` command, decoupled from argument parsing and the process
//! streams.

use crate::{
    export::{to_markdown, to_print_document, ExportTarget},
    view::render_view,
    BriefCleaner, BriefContext, BriefSession, ViewState, TOO_SHORT_MESSAGE,
};
use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
    process::ExitCode,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// The sectioned result view
    #[default]
    View,
    Markdown,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    pub context: BriefContext,
    pub format: OutputFormat,
    /// Markdown export.
    pub copy: Option<ExportTarget>,
    /// Print document export.
    pub print: Option<ExportTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanOutcome {
    /// A brief was produced and written.
    Cleaned,
    /// The input was rejected before any request was made.
    Rejected,
    /// The request ended in the error view.
    Failed,
}

impl CleanOutcome {
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Cleaned
    }

    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Pick the raw brief from the argument, then the file, then `stdin`.
pub fn read_input(text: Option<String>, file: Option<&Path>, stdin: impl Read) -> io::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return fs::read_to_string(path)
            .map_err(|error| io::Error::new(error.kind(), format!("{}: {error}", path.display())));
    }
    io::read_to_string(stdin)
}

/// Clean `raw_text` and write the chosen format to `out`. Progress, hints and
/// the error view go to `err`.
pub async fn run_clean<O, E>(
    cleaner: &BriefCleaner,
    raw_text: String,
    options: &CleanOptions,
    out: &mut O,
    err: &mut E,
) -> io::Result<CleanOutcome>
where
    O: Write,
    E: Write,
{
    let mut session = BriefSession::new(raw_text, options.context);

    if !session.can_submit() {
        writeln!(err, "{}", session.input_hint().unwrap_or(TOO_SHORT_MESSAGE))?;
        return Ok(CleanOutcome::Rejected);
    }

    write!(err, "{}", render_view(&ViewState::Loading))?;

    let state = match session.submit(cleaner).await {
        Ok(state) => state,
        Err(error) => {
            writeln!(err, "{}", error.user_message())?;
            return Ok(CleanOutcome::Rejected);
        }
    };

    let Some(brief) = state.brief() else {
        write!(err, "{}", render_view(state))?;
        return Ok(CleanOutcome::Failed);
    };

    let output = match options.format {
        OutputFormat::View => render_view(state),
        OutputFormat::Markdown => to_markdown(brief),
        OutputFormat::Json => format!(
            "{}\n",
            serde_json::to_string_pretty(brief).map_err(io::Error::other)?
        ),
    };
    out.write_all(output.as_bytes())?;
    out.flush()?;

    if let Some(target) = &options.copy {
        target.write_to(&to_markdown(brief), out)?;
        writeln!(err, "Brief copied as Markdown.")?;
    }
    if let Some(target) = &options.print {
        target.write_to(&to_print_document(brief), out)?;
    }

    Ok(CleanOutcome::Cleaned)
}
