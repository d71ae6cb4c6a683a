//! Markdown report generation.
//!
//! Reports are written next to the session data as `summary.md` and are
//! meant to be pasted into a wiki or PR description as-is: a title and
//! metadata header, an optional AI summary, then every command as a
//! numbered step with its captured output.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::events::Event;
use crate::store::{Session, SessionMeta};

/// State of the AI summary section of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiSummary {
    /// Summary was not requested; the section is omitted entirely.
    Skipped,
    /// Summary text to include verbatim.
    Ready(String),
    /// Summary was requested but failed; the report carries a note
    /// instead so the reader knows it is missing, not forgotten.
    Unavailable(String),
}

/// Render the report for a session.
pub fn render_report(meta: &SessionMeta, events: &[Event], ai: &AiSummary) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# Troubleshooting Session: {}", meta.name));
    lines.push(String::new());
    lines.push(format!("**Date**: {}", meta.started_at.format("%Y-%m-%d")));
    lines.push(format!("**Session ID**: {}", meta.session_id));
    lines.push(String::new());

    match ai {
        AiSummary::Skipped => {}
        AiSummary::Ready(summary) => {
            lines.push(summary.clone());
            lines.push(String::new());
            lines.push("---".to_string());
            lines.push(String::new());
        }
        AiSummary::Unavailable(reason) => {
            lines.push(format!("> ⚠️ AI summary unavailable: {reason}"));
            lines.push(String::new());
        }
    }

    lines.push("## Raw Session Log".to_string());
    lines.push(String::new());

    let mut step = 0;
    for (i, event) in events.iter().enumerate() {
        let Event::Command { command, .. } = event else {
            continue;
        };

        step += 1;
        lines.push(format!("### Step {step}"));
        lines.push(String::new());
        lines.push("```bash".to_string());
        lines.push(command.clone());
        lines.push("```".to_string());
        lines.push(String::new());

        // Output renders only when it directly follows its command and
        // actually has content.
        if let Some(Event::Output { content, .. }) = events.get(i + 1) {
            if !content.is_empty() {
                lines.push("**Output:**".to_string());
                lines.push(String::new());
                lines.push("```".to_string());
                lines.push(content.clone());
                lines.push("```".to_string());
                lines.push(String::new());
            }
        }
    }

    lines.push("---".to_string());
    lines.push(String::new());
    lines.push("*Generated by FixTrace*".to_string());
    lines.push(String::new());

    lines.join("\n")
}

/// Render and write `summary.md` for a session.
pub fn write_report(session: &Session, events: &[Event], ai: &AiSummary) -> Result<PathBuf> {
    let path = session.summary_path();
    let report = render_report(&session.meta, events, ai);
    fs::write(&path, report)
        .with_context(|| format!("writing report {}", path.display()))?;
    tracing::info!(session = %session.id, path = %path.display(), "report written");
    Ok(path)
}
