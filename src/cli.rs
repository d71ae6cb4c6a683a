//! Command-line interface definition.
//!
//! Lives in the library so the xtask man-page generator can reuse the
//! exact same definitions as the binary.

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;

/// Version string with git and build information baked in at compile
/// time. Falls back gracefully when built outside a git checkout.
pub fn version_string() -> String {
    let sha = option_env!("VERGEN_GIT_SHA").unwrap_or("unknown");
    let date = option_env!("FIXTRACE_BUILD_DATE").unwrap_or("unknown");
    format!("{} ({sha}, built {date})", env!("CARGO_PKG_VERSION"))
}

#[derive(Parser)]
#[command(
    name = "fixtrace",
    about = "Record terminal sessions and turn them into troubleshooting docs",
    version = version_string(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start recording the current terminal session
    Start {
        /// Human-readable session name
        #[arg(long)]
        name: Option<String>,

        /// Stop the recording automatically after this many minutes
        #[arg(long)]
        max_minutes: Option<u64>,
    },

    /// Stop the active recording and generate its report
    Stop {
        /// Include an AI summary in the report
        #[arg(long)]
        ai: bool,
    },

    /// List captured sessions
    List,

    /// Regenerate the report for an existing session
    Generate {
        /// Session ID, as shown by `fixtrace list`
        session_id: String,

        /// Include an AI summary in the report
        #[arg(long)]
        ai: bool,
    },

    /// Ask the AI about the active (or latest) session; without a
    /// question, analyze the most recent error and suggest a fix
    Ask {
        /// Question about the session
        question: Option<String>,
    },

    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Open the config file in $EDITOR
    Edit,
}
