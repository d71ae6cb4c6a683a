//! Report generation: `generate`, plus the finalize step shared with
//! the recording handlers.

use std::path::PathBuf;

use anyhow::Result;

use fixtrace::config::Config;
use fixtrace::events;
use fixtrace::parser;
use fixtrace::render::{self, AiSummary};
use fixtrace::store::{Session, SessionStore};
use fixtrace::summary;
use fixtrace::theme::current_theme;
use fixtrace::Event;

#[cfg(not(tarpaulin_include))]
pub fn handle_generate(session_id: &str, ai: bool) -> Result<()> {
    let config = Config::load()?;
    let store = SessionStore::resolve(&config)?;
    let session = store.open_session(session_id)?;
    let theme = current_theme();

    println!("{}", theme.secondary_text("Generating documentation..."));
    let report_path = regenerate(&session, &config, ai)?;

    println!("{}", theme.success_text("✅ Documentation regenerated"));
    println!(
        "{}",
        theme.accent_text(&format!("Saved to: {}", report_path.display()))
    );

    Ok(())
}

/// Parse the raw transcript and write both the events file and the
/// report. Used when a recording ends.
pub fn finalize(session: &Session, config: &Config, with_ai: bool) -> Result<PathBuf> {
    let events = parser::parse_transcript(session.raw_path())?;
    events::write_events(session.events_path(), &events)?;
    write_with_summary(session, &events, config, with_ai)
}

/// Re-render the report from stored events. When the events file is
/// missing or empty, fall back to parsing the raw transcript again so
/// crashed sessions can still be documented.
pub fn regenerate(session: &Session, config: &Config, with_ai: bool) -> Result<PathBuf> {
    let mut events = events::read_events(session.events_path())?;
    if events.is_empty() {
        events = parser::parse_transcript(session.raw_path())?;
        if !events.is_empty() {
            events::write_events(session.events_path(), &events)?;
        }
    }
    write_with_summary(session, &events, config, with_ai)
}

fn write_with_summary(
    session: &Session,
    events: &[Event],
    config: &Config,
    with_ai: bool,
) -> Result<PathBuf> {
    let ai = if with_ai {
        match summary::summarize(&events::session_log(events), &config.summary) {
            Ok(text) => AiSummary::Ready(text),
            Err(err) => {
                tracing::warn!(error = %err, "AI summary unavailable");
                AiSummary::Unavailable(err.to_string())
            }
        }
    } else {
        AiSummary::Skipped
    };

    render::write_report(session, events, &ai)
}
