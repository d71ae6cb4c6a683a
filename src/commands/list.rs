//! Session listing.

use anyhow::Result;
use humansize::{format_size, DECIMAL};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use fixtrace::config::Config;
use fixtrace::store::{SessionEntry, SessionStore};
use fixtrace::theme::{current_theme, Theme};

const STATUS_COMPLETE: &str = "✅ Complete";
const STATUS_IN_PROGRESS: &str = "⏳ In Progress";

/// Name column never shrinks below this, no matter the terminal.
const MIN_NAME_WIDTH: usize = 12;

#[cfg(not(tarpaulin_include))]
pub fn handle_list() -> Result<()> {
    let config = Config::load()?;
    let store = SessionStore::resolve(&config)?;
    let sessions = store.list_sessions()?;
    let theme = current_theme();

    if sessions.is_empty() {
        println!("{}", theme.secondary_text("No sessions yet"));
        return Ok(());
    }

    let width = terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(100);
    print!("{}", render_table(&sessions, &theme, width));

    Ok(())
}

fn render_table(sessions: &[SessionEntry], theme: &Theme, term_width: usize) -> String {
    let id_width = sessions
        .iter()
        .map(|s| s.id.width())
        .chain(["SESSION ID".width()])
        .max()
        .unwrap_or(0);
    let size_width = "1023.9 kB".width();
    let started_width = "2024-01-01 00:00".width();

    // Name takes whatever is left after the fixed columns and gaps.
    let fixed = id_width + started_width + size_width + STATUS_IN_PROGRESS.width() + 4 * 2;
    let name_width = sessions
        .iter()
        .map(|s| s.name.width())
        .chain(["NAME".width()])
        .max()
        .unwrap_or(0)
        .min(term_width.saturating_sub(fixed).max(MIN_NAME_WIDTH));

    let mut out = String::new();

    out.push_str(&theme.bold_text(&format!(
        "{}  {}  {}  {}  {}\n",
        pad("SESSION ID", id_width),
        pad("NAME", name_width),
        pad("STARTED", started_width),
        pad("SIZE", size_width),
        "STATUS"
    )));

    for session in sessions {
        let status = if session.complete {
            theme.success_text(STATUS_COMPLETE)
        } else {
            theme.warning_text(STATUS_IN_PROGRESS)
        };

        out.push_str(&format!(
            "{}  {}  {}  {}  {}\n",
            theme.accent_text(&pad(&session.id, id_width)),
            pad(&fit(&session.name, name_width), name_width),
            theme.secondary_text(&pad(
                &session.started_at.format("%Y-%m-%d %H:%M").to_string(),
                started_width
            )),
            pad(&format_size(session.raw_bytes, DECIMAL), size_width),
            status
        ));
    }

    out
}

/// Pad with spaces to a display width, not a char count.
fn pad(text: &str, width: usize) -> String {
    let current = text.width();
    let mut out = String::from(text);
    for _ in current..width {
        out.push(' ');
    }
    out
}

/// Truncate to a display width, marking the cut with an ellipsis.
fn fit(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }

    let budget = max.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
