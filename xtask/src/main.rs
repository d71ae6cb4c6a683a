//! Workspace task runner.
//!
//! `cargo run -p xtask -- man` renders the man pages for fixtrace and
//! every subcommand into `target/man/`.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

use fixtrace::cli::Cli as FixtraceCli;

#[derive(Parser)]
#[command(name = "xtask", about = "Repository maintenance tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages into target/man
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => generate_man_pages(&out_dir),
    }
}

fn generate_man_pages(out_dir: &PathBuf) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating man page directory {}", out_dir.display()))?;

    let command = FixtraceCli::command();
    let mut written = 0usize;

    let main_page = clap_mangen::Man::new(command.clone());
    let mut buffer = Vec::new();
    main_page.render(&mut buffer).context("rendering fixtrace.1")?;
    fs::write(out_dir.join("fixtrace.1"), &buffer)?;
    written += 1;

    for sub in command.get_subcommands() {
        if sub.is_hide_set() {
            continue;
        }
        let name = format!("fixtrace-{}.1", sub.get_name());
        let page = clap_mangen::Man::new(sub.clone());
        let mut buffer = Vec::new();
        page.render(&mut buffer)
            .with_context(|| format!("rendering {name}"))?;
        fs::write(out_dir.join(&name), &buffer)?;
        written += 1;
    }

    if written == 0 {
        bail!("no man pages generated");
    }
    println!("wrote {written} man pages to {}", out_dir.display());
    Ok(())
}
