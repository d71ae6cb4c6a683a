//! FixTrace - Terminal Session Recorder
//!
//! Captures interactive terminal sessions with `script(1)` and converts the
//! raw transcript into a structured sequence of command/output events, a
//! Markdown troubleshooting document, and (optionally) an AI-generated
//! summary.
//!
//! The interesting part lives in [`parser`]: a heuristic segmenter that
//! turns an escape-laden byte soup into discrete events. Everything else is
//! bookkeeping around it.

pub mod capture;
pub mod cli;
pub mod config;
pub mod events;
pub mod parser;
pub mod render;
pub mod store;
pub mod summary;
pub mod theme;

pub use capture::Recorder;
pub use config::Config;
pub use events::Event;
pub use store::{Session, SessionStore};
