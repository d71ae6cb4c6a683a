//! Subcommand handlers.
//!
//! Each file owns one command surface and talks to the library crate;
//! nothing here is reachable from the library itself.

pub mod ask;
pub mod config;
pub mod list;
pub mod record;
pub mod report;
