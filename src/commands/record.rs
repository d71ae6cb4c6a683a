//! Start/stop recording handlers.
//!
//! `start` spawns script(1) and then blocks until the recorded shell
//! exits. `stop` usually runs in a second terminal and works purely
//! through the marker file and the recorded pid. Exactly one of the two
//! finalizes a session: `stop` claims it by clearing the marker before
//! signalling, and the waiting `start` only finalizes when the marker
//! still names its own session after the wait.

use std::time::Duration;

use anyhow::{bail, Context, Result};

use fixtrace::capture::{self, Recorder};
use fixtrace::config::Config;
use fixtrace::store::SessionStore;
use fixtrace::theme::current_theme;

use crate::commands::report;

#[cfg(not(tarpaulin_include))]
pub fn handle_start(name: Option<String>, max_minutes: Option<u64>) -> Result<()> {
    if !atty::is(atty::Stream::Stdin) {
        bail!("recording needs an interactive terminal");
    }

    let config = Config::load()?;
    let store = SessionStore::resolve(&config)?;
    let theme = current_theme();

    let session = store.create_session(name.as_deref())?;

    println!(
        "{}",
        theme.success_text(&format!("✅ Session started: {}", session.id))
    );
    println!(
        "{}",
        theme.secondary_text(&format!("Recording to: {}", session.dir.display()))
    );

    let mut recorder = Recorder::spawn(&session.raw_path())?;
    store.write_active(&session.id, recorder.pid())?;

    // Ctrl-C typed in the recorded shell must not take this process
    // down with it; the wait below has to survive until script exits.
    ctrlc::set_handler(|| {}).context("installing signal handler")?;

    let limit = max_minutes.or(config.recording.max_minutes);
    if let Some(minutes) = limit {
        capture::spawn_watchdog(recorder.pid(), Duration::from_secs(minutes.saturating_mul(60)));
        println!(
            "{}",
            theme.secondary_text(&format!("Recording stops automatically after {minutes} min"))
        );
    }

    println!("{}", theme.secondary_text("Run 'fixtrace stop' when done"));
    recorder.wait()?;

    // If the marker still names this session, the shell ended on its
    // own (exit, or the time limit) and finalizing falls to us. If it
    // is gone, a `stop` in another terminal owns the session.
    match store.active() {
        Some(active) if active.session_id == session.id => {
            store.clear_active()?;

            println!("{}", theme.secondary_text("Parsing session..."));
            let report_path = report::finalize(&session, &config, false)?;

            println!("{}", theme.success_text("✅ Session complete!"));
            println!(
                "{}",
                theme.accent_text(&format!("Docs saved to: {}", report_path.display()))
            );
        }
        _ => tracing::debug!(session = %session.id, "session finalized elsewhere"),
    }

    Ok(())
}

#[cfg(not(tarpaulin_include))]
pub fn handle_stop(ai: bool) -> Result<()> {
    let config = Config::load()?;
    let store = SessionStore::resolve(&config)?;
    let theme = current_theme();

    let Some(active) = store.active() else {
        bail!("no active recording");
    };

    println!(
        "{}",
        theme.warning_text(&format!("Stopping session {}...", active.session_id))
    );

    // Claim the session before signalling, so the waiting `start`
    // process sees the marker gone and leaves finalizing to us.
    store.clear_active()?;
    capture::terminate(active.pid);

    let session = store.open_session(&active.session_id)?;

    println!("{}", theme.secondary_text("Parsing session..."));
    let report_path = report::finalize(&session, &config, ai)?;

    println!("{}", theme.success_text("✅ Session complete!"));
    println!(
        "{}",
        theme.accent_text(&format!("Docs saved to: {}", report_path.display()))
    );

    Ok(())
}
