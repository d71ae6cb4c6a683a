//! Session store lifecycle: create, reopen, list, active marker.

use chrono::{DateTime, Local, TimeZone};
use tempfile::TempDir;

use fixtrace::store::{SessionMeta, SessionStore};

/// Plant a session directory by hand so listing order is deterministic.
fn seed_session(store: &SessionStore, id: &str, name: &str, started_at: DateTime<Local>) {
    let dir = store.session_dir(id);
    std::fs::create_dir_all(&dir).unwrap();
    let meta = SessionMeta {
        session_id: id.to_string(),
        name: name.to_string(),
        started_at,
    };
    std::fs::write(
        dir.join("metadata.json"),
        serde_json::to_string_pretty(&meta).unwrap(),
    )
    .unwrap();
}

// ============================================================================
// Create / Reopen Tests
// ============================================================================

#[test]
fn create_then_reopen_preserves_metadata() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    let session = store.create_session(Some("disk full on web-1")).unwrap();
    let reopened = store.open_session(&session.id).unwrap();

    assert_eq!(reopened.meta, session.meta);
    assert_eq!(reopened.meta.name, "disk full on web-1");
    assert!(session.dir.is_dir());
}

#[test]
fn session_id_has_date_prefix_and_suffix() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    let session = store.create_session(None).unwrap();

    assert_eq!(session.id.len(), "2024-05-01-abc123".len());
    assert!(session.id[..10].parse::<chrono::NaiveDate>().is_ok());
    // Unnamed sessions fall back to the id.
    assert_eq!(session.meta.name, session.id);
}

#[test]
fn open_session_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    let err = store.open_session("2099-01-01-zzzzzz").unwrap_err();
    assert!(err.to_string().contains("session not found"));
}

// ============================================================================
// Active Marker Tests
// ============================================================================

#[test]
fn active_marker_blocks_new_recordings_until_cleared() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    let session = store.create_session(None).unwrap();

    store.write_active(&session.id, 4242).unwrap();
    let active = store.active().unwrap();
    assert_eq!(active.session_id, session.id);
    assert_eq!(active.pid, 4242);

    let err = store.create_session(None).unwrap_err();
    assert!(err.to_string().contains("already in progress"));

    store.clear_active().unwrap();
    assert!(store.active().is_none());
    store.create_session(None).unwrap();
}

// ============================================================================
// Listing Tests
// ============================================================================

#[test]
fn list_orders_newest_first_and_tracks_completion() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());

    seed_session(
        &store,
        "2024-05-01-aaaaaa",
        "first",
        Local.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    );
    seed_session(
        &store,
        "2024-05-02-bbbbbb",
        "second",
        Local.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap(),
    );
    std::fs::write(store.session_dir("2024-05-01-aaaaaa").join("raw.txt"), "$ df -h\n").unwrap();
    std::fs::write(store.session_dir("2024-05-01-aaaaaa").join("summary.md"), "# done\n").unwrap();

    let entries = store.list_sessions().unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "2024-05-02-bbbbbb");
    assert!(!entries[0].complete);
    assert_eq!(entries[0].raw_bytes, 0);
    assert_eq!(entries[1].id, "2024-05-01-aaaaaa");
    assert!(entries[1].complete);
    assert_eq!(entries[1].raw_bytes, 8);
}

#[test]
fn list_skips_directory_without_metadata() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path());
    seed_session(
        &store,
        "2024-05-01-cccccc",
        "kept",
        Local.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
    );
    std::fs::create_dir_all(store.session_dir("2024-05-01-broken")).unwrap();

    let entries = store.list_sessions().unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "2024-05-01-cccccc");
}
