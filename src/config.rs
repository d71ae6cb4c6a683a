//! User configuration.
//!
//! Read from `fixtrace/config.toml` under the platform config directory.
//! Every field has a default, so a missing file or a file with only a
//! couple of overrides both work. Unknown keys are ignored rather than
//! rejected, which lets old binaries read configs written by newer ones.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration, one section per concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub recording: RecordingConfig,
}

/// Where session data lives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Override for the storage root. Unset means `~/.fixtrace`.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// AI summary generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Gemini model name used for summaries and questions.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Recording behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Auto-stop recordings after this many minutes. Unset means no limit;
    /// the `--max-minutes` flag overrides either way.
    #[serde(default)]
    pub max_minutes: Option<u64>,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Path of the config file: `<config dir>/fixtrace/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| anyhow!("no config directory on this system"))?;
        Ok(base.join("fixtrace").join("config.toml"))
    }

    /// Load the user config, falling back to defaults when no file exists.
    pub fn load() -> Result<Config> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path. Missing file yields the defaults; a
    /// file that exists but does not parse is an error the user should
    /// see, not something to silently paper over.
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Write this config to the default location, creating directories
    /// as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Write this config to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }
        let toml_str = toml::to_string_pretty(self).context("serializing config")?;
        fs::write(path, toml_str).with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }
}
