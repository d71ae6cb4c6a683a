//! Config subcommands handler.

use anyhow::{Context, Result};

use fixtrace::theme::current_theme;
use fixtrace::Config;

/// Show current configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    let theme = current_theme();
    println!("{}", theme.primary_text(&toml_str));
    Ok(())
}

/// Open the configuration file in the default editor.
///
/// Uses $EDITOR, defaulting to 'vi'. A missing file is written with
/// defaults first so the user edits real keys instead of an empty
/// buffer.
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;
    let theme = current_theme();

    if !config_path.exists() {
        Config::default().save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!(
        "{}",
        theme.primary_text(&format!(
            "Opening {} with {}",
            config_path.display(),
            editor
        ))
    );

    let status = std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("launching editor {editor}"))?;

    if !status.success() {
        tracing::warn!(%editor, "editor exited with failure");
    }

    Ok(())
}
