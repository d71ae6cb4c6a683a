//! fixtrace binary entry point.

use std::io;
use std::process::exit;

use clap::{CommandFactory, Parser};

use fixtrace::cli::{Cli, Command, ConfigAction};
use fixtrace::theme::current_theme;

mod commands;

#[cfg(not(tarpaulin_include))]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        let theme = current_theme();
        eprintln!("{}", theme.error_text(&format!("❌ Error: {err:#}")));
        exit(1);
    }
}

#[cfg(not(tarpaulin_include))]
fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Start { name, max_minutes } => commands::record::handle_start(name, max_minutes),
        Command::Stop { ai } => commands::record::handle_stop(ai),
        Command::List => commands::list::handle_list(),
        Command::Generate { session_id, ai } => commands::report::handle_generate(&session_id, ai),
        Command::Ask { question } => commands::ask::handle_ask(question),
        Command::Config { action } => match action {
            ConfigAction::Show => commands::config::handle_show(),
            ConfigAction::Edit => commands::config::handle_edit(),
        },
        Command::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "fixtrace", &mut io::stdout());
            Ok(())
        }
    }
}

/// Logs go to stderr so they never mix with command output. RUST_LOG
/// overrides the verbosity flags when set.
#[cfg(not(tarpaulin_include))]
fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
