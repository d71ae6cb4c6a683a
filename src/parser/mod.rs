//! Raw transcript to event pipeline.
//!
//! `script(1)` output arrives as a byte stream full of terminal control
//! sequences, backspace corrections, and carriage-return tricks. Parsing
//! runs in two passes over the whole transcript:
//!
//! 1. [`normalize`] strips escape sequences and replays in-line edits so
//!    the text reads like what was visible on screen.
//! 2. [`segment`] walks the cleaned lines, recognizes shell prompts, and
//!    groups everything into alternating command/output emissions.
//!
//! [`parse_transcript`] wraps both passes with file IO and stamps each
//! emission with the wall-clock time of the parse. Capture does not
//! record per-line timing, so all events of one parse share one instant;
//! ordering carries the information.

pub mod normalize;
pub mod segment;

pub use normalize::normalize;
pub use segment::{detect_prompt, segment, Emission, SegmentState};

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::events::Event;

/// Parse raw transcript text into timestamped events.
pub fn parse_str(raw: &str) -> Vec<Event> {
    let clean = normalize(raw);
    let stamp = Utc::now();

    segment::segment(&clean)
        .into_iter()
        .map(|emission| match emission {
            Emission::Command(text) => Event::command(stamp, text),
            Emission::Output(text) => Event::output(stamp, text),
        })
        .collect()
}

/// Parse a raw transcript file.
///
/// A missing file is not an error: recording can die before `script`
/// writes anything, and the session is then simply empty. Invalid UTF-8
/// is decoded lossily rather than rejected, since transcripts routinely
/// contain partial multibyte sequences cut off by the capture ending.
pub fn parse_transcript<P: AsRef<Path>>(path: P) -> Result<Vec<Event>> {
    let path = path.as_ref();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no transcript to parse");
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading transcript {}", path.display()))
        }
    };

    Ok(parse_str(&String::from_utf8_lossy(&bytes)))
}
