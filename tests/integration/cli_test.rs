//! CLI behaviour through the compiled binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use fixtrace::SessionStore;

use crate::helpers::{load_fixture, run_fixtrace};

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_all_subcommands() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_fixtrace(home.path(), &["--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Record terminal sessions"));
    for sub in ["start", "stop", "list", "generate", "ask", "config", "completions"] {
        assert!(stdout.contains(sub), "missing subcommand in help: {sub}");
    }
}

#[test]
fn start_help_documents_flags() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_fixtrace(home.path(), &["start", "--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("--name"));
    assert!(stdout.contains("--max-minutes"));
}

#[test]
fn version_prints_package_version() {
    Command::cargo_bin("fixtrace")
        .unwrap()
        .arg("--version")
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn unknown_subcommand_exits_2() {
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_fixtrace(home.path(), &["frobnicate"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn start_outside_a_terminal_fails() {
    // output() gives the child a null stdin, which is exactly the
    // non-interactive case start refuses.
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_fixtrace(home.path(), &["start"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("interactive terminal"));
}

#[test]
fn stop_without_active_recording_fails() {
    let home = TempDir::new().unwrap();

    Command::cargo_bin("fixtrace")
        .unwrap()
        .arg("stop")
        .env("NO_COLOR", "1")
        .env("FIXTRACE_HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("xdg-config"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no active recording"));
}

#[test]
fn generate_unknown_session_fails() {
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) =
        run_fixtrace(home.path(), &["generate", "2099-01-01-zzzzzz"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("session not found: 2099-01-01-zzzzzz"));
}

#[test]
fn ask_with_no_sessions_fails() {
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_fixtrace(home.path(), &["ask", "what broke?"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("no sessions recorded yet"));
}

#[test]
fn ask_without_api_key_reports_missing_key() {
    let home = TempDir::new().unwrap();
    let store = SessionStore::new(home.path());
    let session = store.create_session(Some("nginx probe")).unwrap();
    std::fs::write(session.raw_path(), load_fixture("sample_raw.txt")).unwrap();

    let (_stdout, stderr, exit_code) =
        run_fixtrace(home.path(), &["ask", "why did nginx fail?"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("GEMINI_API_KEY"));
}

// ============================================================================
// List & Generate Tests
// ============================================================================

#[test]
fn list_empty_store_prints_placeholder() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_fixtrace(home.path(), &["list"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("No sessions yet"));
}

#[test]
fn generate_then_list_marks_complete() {
    let home = TempDir::new().unwrap();
    let store = SessionStore::new(home.path());
    let session = store.create_session(Some("nginx probe")).unwrap();
    std::fs::write(session.raw_path(), load_fixture("sample_raw.txt")).unwrap();

    let (stdout, _stderr, exit_code) = run_fixtrace(home.path(), &["list"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains(&session.id));
    assert!(stdout.contains("⏳ In Progress"));

    let (stdout, stderr, exit_code) = run_fixtrace(home.path(), &["generate", &session.id]);
    assert_eq!(exit_code, 0, "generate failed: {stderr}");
    assert!(stdout.contains("Documentation regenerated"));
    assert!(stdout.contains("Saved to:"));
    assert!(session.summary_path().is_file());

    let (stdout, _stderr, _) = run_fixtrace(home.path(), &["list"]);
    assert!(stdout.contains("✅ Complete"));
    assert!(stdout.contains("nginx probe"));
}

#[test]
fn generated_report_contains_transcript_commands() {
    let home = TempDir::new().unwrap();
    let store = SessionStore::new(home.path());
    let session = store.create_session(Some("nginx probe")).unwrap();
    std::fs::write(session.raw_path(), load_fixture("sample_raw.txt")).unwrap();

    let (_stdout, _stderr, exit_code) = run_fixtrace(home.path(), &["generate", &session.id]);
    assert_eq!(exit_code, 0);

    let report = std::fs::read_to_string(session.summary_path()).unwrap();
    assert!(report.contains("# Troubleshooting Session: nginx probe"));
    assert!(report.contains("### Step 1"));
    assert!(report.contains("systemctl status nginx"));
}

// ============================================================================
// Config & Completions Tests
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_fixtrace(home.path(), &["config", "show"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[summary]"));
    assert!(stdout.contains("model = \"gemini-2.5-flash\""));
}

#[test]
fn completions_bash_emits_completion_function() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_fixtrace(home.path(), &["completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("_fixtrace"));
}
