//! Ad-hoc AI questions about a session.
//!
//! Context comes from the active recording when there is one, so the
//! user can ask mid-session from inside the recorded shell; otherwise
//! the newest session is used. Only the tail of the transcript is sent,
//! long sessions would blow the prompt budget otherwise.

use std::fs;

use anyhow::{anyhow, bail, Context, Result};

use fixtrace::config::Config;
use fixtrace::parser;
use fixtrace::store::{Session, SessionStore};
use fixtrace::summary;
use fixtrace::theme::current_theme;

const MAX_CONTEXT_LINES: usize = 400;

#[cfg(not(tarpaulin_include))]
pub fn handle_ask(question: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let store = SessionStore::resolve(&config)?;
    let theme = current_theme();

    let session = context_session(&store)?;
    let context = session_context(&session)?;

    println!(
        "{}",
        theme.secondary_text(&format!("Analyzing session {}...", session.id))
    );

    let response = summary::answer(&context, question.as_deref(), &config.summary)?;
    println!();
    println!("{response}");

    Ok(())
}

/// The session to answer about: active recording first, newest
/// otherwise.
fn context_session(store: &SessionStore) -> Result<Session> {
    if let Some(active) = store.active() {
        return store.open_session(&active.session_id);
    }

    let sessions = store.list_sessions()?;
    let latest = sessions
        .first()
        .ok_or_else(|| anyhow!("no sessions recorded yet, run: fixtrace start"))?;
    store.open_session(&latest.id)
}

/// Tail of the session transcript, stripped of escape sequences.
fn session_context(session: &Session) -> Result<String> {
    let raw_path = session.raw_path();
    if !raw_path.exists() {
        bail!("session {} has no transcript", session.id);
    }

    let bytes = fs::read(&raw_path)
        .with_context(|| format!("reading transcript {}", raw_path.display()))?;
    let clean = parser::normalize(&String::from_utf8_lossy(&bytes));
    Ok(tail_lines(&clean, MAX_CONTEXT_LINES))
}

fn tail_lines(text: &str, limit: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(limit);
    lines[start..].join("\n")
}
