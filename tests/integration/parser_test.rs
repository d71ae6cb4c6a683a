//! End-to-end parsing of a captured `script` transcript.

use fixtrace::parser::{normalize, parse_str, parse_transcript};
use tempfile::TempDir;

use crate::helpers::load_fixture;

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn sample_transcript_yields_expected_events() {
    let raw = load_fixture("sample_raw.txt");
    let events = parse_str(&raw);

    let got: Vec<(&str, &str)> = events
        .iter()
        .map(|e| {
            let kind = if e.is_command() { "command" } else { "output" };
            (kind, e.text())
        })
        .collect();

    assert_eq!(
        got,
        vec![
            ("command", "systemctl status nginx"),
            (
                "output",
                "● nginx.service - A high performance web server\nActive: failed (Result: exit-code)"
            ),
            ("command", "sudo nginx -t"),
            (
                "output",
                "nginx: [emerg] unknown directive \"client_max_size\" in /etc/nginx/nginx.conf:42\nnginx: configuration file /etc/nginx/nginx.conf test failed"
            ),
            ("command", "exit"),
            (
                "output",
                "exit\nScript done on 2024-05-01 09:31:40+00:00 [COMMAND_EXIT_CODE=\"0\"]"
            ),
        ]
    );
}

#[test]
fn sample_transcript_events_share_one_timestamp() {
    let events = parse_str(&load_fixture("sample_raw.txt"));

    assert!(!events.is_empty());
    let first = events[0].timestamp();
    assert!(events.iter().all(|e| e.timestamp() == first));
}

#[test]
fn normalized_transcript_has_no_escape_codes() {
    let clean = normalize(&load_fixture("sample_raw.txt"));

    assert!(!clean.contains('\x1b'));
    assert!(!clean.contains('\r'));
    assert!(clean.contains("user@web-1:~$ systemctl status nginx"));
}

// ============================================================================
// File Handling Tests
// ============================================================================

#[test]
fn parse_transcript_matches_in_memory_parse() {
    let raw = load_fixture("sample_raw.txt");
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("raw.txt");
    std::fs::write(&path, &raw).unwrap();

    let texts = |events: &[fixtrace::Event]| -> Vec<String> {
        events.iter().map(|e| e.text().to_string()).collect()
    };

    let from_file = parse_transcript(&path).unwrap();
    assert_eq!(texts(&from_file), texts(&parse_str(&raw)));
}

#[test]
fn parse_transcript_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();

    let events = parse_transcript(dir.path().join("nope.txt")).unwrap();
    assert!(events.is_empty());
}
