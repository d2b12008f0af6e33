use crate::{view::render_brief, StructuredBrief};
use std::{
    fmt::Write as _,
    fs,
    io::{self, Write},
    path::PathBuf,
};

fn push_bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
}

/// Serialize a brief into the fixed "Project Brief" Markdown template.
/// Empty lists keep their heading with no bullet lines.
#[must_use]
pub fn to_markdown(brief: &StructuredBrief) -> String {
    let mut out = String::from("# Project Brief\n\n");

    let _ = writeln!(out, "## Summary\n{}\n", brief.summary);

    out.push_str("## Objectives\n");
    push_bullets(&mut out, &brief.objectives);

    let _ = writeln!(out, "\n## Target Audience\n{}\n", brief.target_audience);

    out.push_str("## Deliverables\n");
    push_bullets(&mut out, &brief.deliverables);

    out.push_str("\n## Constraints\n### Technical\n");
    push_bullets(&mut out, &brief.constraints.technical);
    out.push_str("### Timeline\n");
    push_bullets(&mut out, &brief.constraints.timeline);
    out.push_str("### Budget\n");
    push_bullets(&mut out, &brief.constraints.budget);

    out.push_str("\n## Clarifications Needed\n");
    push_bullets(&mut out, &brief.ambiguities);

    out.push_str("\n## Assumptions\n");
    push_bullets(&mut out, &brief.assumptions);

    out.push_str("\n## Risks\n");
    push_bullets(&mut out, &brief.risks);

    out
}

/// A print-ready plain-text document of the result view.
#[must_use]
pub fn to_print_document(brief: &StructuredBrief) -> String {
    let title = "PROJECT BRIEF";
    format!("{title}\n{}\n\n{}", "=".repeat(title.len()), render_brief(brief))
}

/// Written before an export that goes to standard output, which always
/// follows the main command output.
pub const STDOUT_SEPARATOR: &str = "\n---\n\n";

/// Where an export is written: standard output or a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    Stdout,
    File(PathBuf),
}

impl ExportTarget {
    /// `-` selects standard output, anything else is a file path.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "-" {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(value))
        }
    }

    /// Write `content` to the file, or to `stdout` after [`STDOUT_SEPARATOR`].
    pub fn write_to(&self, content: &str, stdout: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Stdout => {
                stdout.write_all(STDOUT_SEPARATOR.as_bytes())?;
                stdout.write_all(content.as_bytes())?;
                stdout.flush()
            }
            Self::File(path) => {
                fs::write(path, content)?;
                tracing::info!(path = %path.display(), bytes = content.len(), "export written");
                Ok(())
            }
        }
    }
}
