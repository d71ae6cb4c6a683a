//! Markdown report rendering from parsed transcripts.

use chrono::{Local, TimeZone};
use tempfile::TempDir;

use fixtrace::parser::parse_str;
use fixtrace::render::{render_report, write_report, AiSummary};
use fixtrace::store::{SessionMeta, SessionStore};

use super::helpers::load_fixture;

fn sample_meta() -> SessionMeta {
    SessionMeta {
        session_id: "2024-05-01-abc123".to_string(),
        name: "broken nginx".to_string(),
        started_at: Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
    }
}

// ============================================================================
// Report Layout Tests
// ============================================================================

#[test]
fn report_covers_all_transcript_commands() {
    let events = parse_str(&load_fixture("sample_raw.txt"));

    let report = render_report(&sample_meta(), &events, &AiSummary::Skipped);

    assert!(report.starts_with("# Troubleshooting Session: broken nginx\n"));
    assert!(report.contains("**Date**: 2024-05-01"));
    assert!(report.contains("**Session ID**: 2024-05-01-abc123"));
    assert!(report.contains("### Step 1"));
    assert!(report.contains("### Step 3"));
    assert!(!report.contains("### Step 4"));
    assert!(report.contains("```bash\nsystemctl status nginx\n```"));
    assert!(report.contains("**Output:**"));
    assert!(report.ends_with("*Generated by FixTrace*\n"));
}

#[test]
fn ai_summary_renders_above_the_session_log() {
    let events = parse_str(&load_fixture("sample_raw.txt"));
    let ai = AiSummary::Ready("🛠 FixTrace Summary\n\nnginx config had a bad directive.".to_string());

    let report = render_report(&sample_meta(), &events, &ai);

    let summary_at = report.find("bad directive").unwrap();
    let log_at = report.find("## Raw Session Log").unwrap();
    assert!(summary_at < log_at);
}

#[test]
fn unavailable_ai_summary_is_called_out() {
    let events = parse_str(&load_fixture("sample_raw.txt"));
    let ai = AiSummary::Unavailable("Gemini API error: HTTP 500".to_string());

    let report = render_report(&sample_meta(), &events, &ai);

    assert!(report.contains("> ⚠️ AI summary unavailable: Gemini API error: HTTP 500"));
    assert!(report.contains("## Raw Session Log"));
}

// ============================================================================
// File Output Tests
// ============================================================================

#[test]
fn write_report_marks_session_complete() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    let session = store.create_session(Some("report test")).unwrap();
    let events = parse_str(&load_fixture("sample_raw.txt"));

    let path = write_report(&session, &events, &AiSummary::Skipped).unwrap();

    assert_eq!(path, session.summary_path());
    assert!(path.is_file());
    let entries = store.list_sessions().unwrap();
    assert!(entries.iter().any(|e| e.id == session.id && e.complete));
}
