//! On-disk session storage.
//!
//! Everything lives under one root (default `~/.fixtrace`):
//!
//! ```text
//! <root>/
//!   active_session.pid        marker: "<session id>:<pid>" while recording
//!   sessions/<session id>/
//!     metadata.json           id, name, start time
//!     raw.txt                 raw transcript written by script(1)
//!     events.jsonl            parsed command/output events
//!     summary.md              generated report
//! ```
//!
//! Session IDs are `YYYY-MM-DD-` plus six random lowercase alphanumerics,
//! so directory listings sort by day on their own. The marker file is the
//! only cross-process state: it both names the active session and blocks
//! a second concurrent recording.

use std::collections::hash_map::RandomState;
use std::fs;
use std::hash::{BuildHasher, Hasher};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::config::Config;

const DEFAULT_DIR_NAME: &str = ".fixtrace";
const MARKER_FILE: &str = "active_session.pid";
const METADATA_FILE: &str = "metadata.json";
const RAW_FILE: &str = "raw.txt";
const EVENTS_FILE: &str = "events.jsonl";
const SUMMARY_FILE: &str = "summary.md";

const ID_SUFFIX_LEN: usize = 6;
const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Handle on a storage root.
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
}

/// Persisted per-session metadata (`metadata.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMeta {
    pub session_id: String,
    pub name: String,
    pub started_at: DateTime<Local>,
}

/// An opened session: its id, directory, and metadata.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub dir: PathBuf,
    pub meta: SessionMeta,
}

/// One row of `fixtrace list`.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub id: String,
    pub name: String,
    pub started_at: DateTime<Local>,
    pub raw_bytes: u64,
    /// True once a report has been generated for the session.
    pub complete: bool,
}

/// Contents of the active-recording marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRecording {
    pub session_id: String,
    pub pid: u32,
}

impl Session {
    pub fn raw_path(&self) -> PathBuf {
        self.dir.join(RAW_FILE)
    }

    pub fn events_path(&self) -> PathBuf {
        self.dir.join(EVENTS_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(SUMMARY_FILE)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.dir.join(METADATA_FILE)
    }
}

impl SessionStore {
    /// Open a store rooted at an explicit directory.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the storage root: `$FIXTRACE_HOME`, then the config
    /// override, then `~/.fixtrace`.
    pub fn resolve(config: &Config) -> Result<Self> {
        if let Some(root) = std::env::var_os("FIXTRACE_HOME").filter(|v| !v.is_empty()) {
            return Ok(Self::new(PathBuf::from(root)));
        }
        if let Some(root) = &config.storage.root {
            return Ok(Self::new(root.clone()));
        }
        let home = dirs::home_dir().ok_or_else(|| anyhow!("no home directory on this system"))?;
        Ok(Self::new(home.join(DEFAULT_DIR_NAME)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.root.join("sessions")
    }

    pub fn session_dir(&self, id: &str) -> PathBuf {
        self.sessions_dir().join(id)
    }

    fn marker_path(&self) -> PathBuf {
        self.root.join(MARKER_FILE)
    }

    fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(self.sessions_dir())
            .with_context(|| format!("creating storage directory {}", self.root.display()))
    }

    /// Create a fresh session directory with metadata.
    ///
    /// Refuses while a recording marker exists: one recording per store.
    pub fn create_session(&self, name: Option<&str>) -> Result<Session> {
        self.ensure_dirs()?;

        if self.marker_path().exists() {
            bail!("a recording is already in progress, stop it first with: fixtrace stop");
        }

        let mut id = generate_session_id();
        while self.session_dir(&id).exists() {
            id = generate_session_id();
        }

        let dir = self.session_dir(&id);
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating session directory {}", dir.display()))?;

        let meta = SessionMeta {
            session_id: id.clone(),
            name: name.map(str::to_string).unwrap_or_else(|| id.clone()),
            started_at: Local::now(),
        };
        let json = serde_json::to_string_pretty(&meta).context("serializing session metadata")?;
        fs::write(dir.join(METADATA_FILE), json)
            .with_context(|| format!("writing metadata for session {id}"))?;

        tracing::info!(session = %id, dir = %dir.display(), "created session");
        Ok(Session { id, dir, meta })
    }

    /// Open an existing session by id.
    ///
    /// The directory must exist; missing or unreadable metadata is
    /// tolerated with synthesized values so old or damaged sessions can
    /// still be listed and regenerated.
    pub fn open_session(&self, id: &str) -> Result<Session> {
        let dir = self.session_dir(id);
        if !dir.is_dir() {
            bail!("session not found: {id}");
        }

        let meta = match read_meta(&dir.join(METADATA_FILE)) {
            Ok(meta) => meta,
            Err(err) => {
                tracing::warn!(session = %id, error = %err, "unreadable metadata, using fallbacks");
                SessionMeta {
                    session_id: id.to_string(),
                    name: id.to_string(),
                    started_at: started_at_from_id(id),
                }
            }
        };

        Ok(Session {
            id: id.to_string(),
            dir,
            meta,
        })
    }

    /// All sessions, newest first.
    ///
    /// Directories without readable metadata are skipped with a warning
    /// rather than failing the whole listing.
    pub fn list_sessions(&self) -> Result<Vec<SessionEntry>> {
        let sessions_dir = self.sessions_dir();
        let entries = match fs::read_dir(&sessions_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading sessions in {}", sessions_dir.display()))
            }
        };

        let mut sessions = Vec::new();
        for entry in entries {
            let entry = entry.context("reading session directory entry")?;
            if !entry.path().is_dir() {
                continue;
            }
            let id = entry.file_name().to_string_lossy().into_owned();

            let meta = match read_meta(&entry.path().join(METADATA_FILE)) {
                Ok(meta) => meta,
                Err(err) => {
                    tracing::warn!(session = %id, error = %err, "skipping session without metadata");
                    continue;
                }
            };

            let raw_bytes = fs::metadata(entry.path().join(RAW_FILE))
                .map(|m| m.len())
                .unwrap_or(0);
            let complete = entry.path().join(SUMMARY_FILE).exists();

            sessions.push(SessionEntry {
                id,
                name: meta.name,
                started_at: meta.started_at,
                raw_bytes,
                complete,
            });
        }

        sessions.sort_by(|a, b| {
            b.started_at
                .cmp(&a.started_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(sessions)
    }

    /// Record the active session marker: `<session id>:<pid>`.
    pub fn write_active(&self, session_id: &str, pid: u32) -> Result<()> {
        self.ensure_dirs()?;
        fs::write(self.marker_path(), format!("{session_id}:{pid}"))
            .context("writing active recording marker")
    }

    /// Read the active marker, if any. Garbage content reads as no
    /// active recording.
    pub fn active(&self) -> Option<ActiveRecording> {
        let content = fs::read_to_string(self.marker_path()).ok()?;
        let (session_id, pid) = content.trim().rsplit_once(':')?;
        match pid.parse() {
            Ok(pid) if !session_id.is_empty() => Some(ActiveRecording {
                session_id: session_id.to_string(),
                pid,
            }),
            _ => {
                tracing::warn!(content = %content.trim(), "malformed recording marker ignored");
                None
            }
        }
    }

    /// Remove the active marker. Already gone is fine.
    pub fn clear_active(&self) -> Result<()> {
        match fs::remove_file(self.marker_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context("removing active recording marker"),
        }
    }
}

fn read_meta(path: &Path) -> Result<SessionMeta> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// New session id: local date plus a short random suffix.
fn generate_session_id() -> String {
    let date = Local::now().format("%Y-%m-%d");
    format!("{date}-{}", random_suffix())
}

/// Six characters of `[a-z0-9]`, seeded from the hasher's per-process
/// randomness mixed with time and pid. Not cryptographic, just unique
/// enough for directory names.
fn random_suffix() -> String {
    let mut hasher = RandomState::new().build_hasher();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    hasher.write_u128(nanos);
    hasher.write_u32(std::process::id());

    let mut value = hasher.finish();
    let mut suffix = String::with_capacity(ID_SUFFIX_LEN);
    for _ in 0..ID_SUFFIX_LEN {
        suffix.push(ID_ALPHABET[(value % ID_ALPHABET.len() as u64) as usize] as char);
        value /= ID_ALPHABET.len() as u64;
    }
    suffix
}

/// Best-effort start time for a session whose metadata is gone, taken
/// from the date prefix of the id.
fn started_at_from_id(id: &str) -> DateTime<Local> {
    id.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| Local.from_local_datetime(&naive).single())
        .unwrap_or_else(Local::now)
}
