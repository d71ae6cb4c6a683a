//! Command/output event records and their JSONL persistence.
//!
//! Parsed transcripts become an ordered sequence of [`Event`] values, one
//! JSON object per line on disk. Decoding is tolerant: blank lines and
//! malformed records are skipped so a partially written file still yields
//! the events that made it to disk.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One parsed event: something the user typed, or what the shell printed
/// back.
///
/// A `Command` is followed by at most one `Output`; a command with no
/// captured output simply has no output record after it. An empty command
/// (bare Enter at the prompt) is stored as a single space so it stays
/// distinguishable from "no command yet".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Command {
        timestamp: DateTime<Utc>,
        command: String,
    },
    Output {
        timestamp: DateTime<Utc>,
        content: String,
    },
}

impl Event {
    pub fn command(timestamp: DateTime<Utc>, text: impl Into<String>) -> Self {
        Event::Command {
            timestamp,
            command: text.into(),
        }
    }

    pub fn output(timestamp: DateTime<Utc>, text: impl Into<String>) -> Self {
        Event::Output {
            timestamp,
            content: text.into(),
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Event::Command { .. })
    }

    pub fn is_output(&self) -> bool {
        matches!(self, Event::Output { .. })
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Event::Command { timestamp, .. } | Event::Output { timestamp, .. } => *timestamp,
        }
    }

    /// The variant's text payload (command text or output content).
    pub fn text(&self) -> &str {
        match self {
            Event::Command { command, .. } => command,
            Event::Output { content, .. } => content,
        }
    }

    /// Parse an event from one JSONL record.
    pub fn from_json(line: &str) -> Result<Self> {
        serde_json::from_str(line).context("Failed to parse event record")
    }

    /// Serialize the event as one JSONL record (no trailing newline).
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize event record")
    }
}

/// Read events from a JSONL file.
///
/// A missing file is not an error: a session can be stopped before any
/// output was captured, so absence decodes as an empty sequence.
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<Event>> {
    let path = path.as_ref();
    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to open events file: {}", path.display()))
        }
    };
    read_events_from(BufReader::new(file))
}

/// Read events from any buffered reader, skipping blank and malformed
/// lines.
pub fn read_events_from<R: BufRead>(reader: R) -> Result<Vec<Event>> {
    let mut events = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line =
            line_result.with_context(|| format!("Failed to read line {}", line_num + 1))?;

        if line.trim().is_empty() {
            continue;
        }

        match Event::from_json(&line) {
            Ok(event) => events.push(event),
            Err(err) => {
                tracing::debug!(line = line_num + 1, %err, "skipping malformed event record");
            }
        }
    }

    Ok(events)
}

/// Write events to a JSONL file, one record per line.
pub fn write_events<P: AsRef<Path>>(path: P, events: &[Event]) -> Result<()> {
    let path = path.as_ref();
    let mut file = fs::File::create(path)
        .with_context(|| format!("Failed to create events file: {}", path.display()))?;
    write_events_to(&mut file, events)
}

/// Write events to any writer.
pub fn write_events_to<W: Write>(writer: &mut W, events: &[Event]) -> Result<()> {
    for event in events {
        writeln!(writer, "{}", event.to_json()?)?;
    }
    Ok(())
}

/// Flatten events into a plain-text session log.
///
/// Commands render as `$ <command>` lines, outputs as their raw content,
/// joined with newlines in original order. This is the one-way projection
/// fed to the summarizer; there is no inverse.
pub fn session_log(events: &[Event]) -> String {
    let mut lines = Vec::new();

    for event in events {
        match event {
            Event::Command { command, .. } => lines.push(format!("$ {}", command)),
            Event::Output { content, .. } => {
                if !content.is_empty() {
                    lines.push(content.clone());
                }
            }
        }
    }

    lines.join("\n")
}
