//! Color theme for CLI output.
//!
//! Centralizes ANSI styling so command handlers never hardcode escape
//! codes. Colors are disabled automatically when stdout is not a terminal.

/// Raw ANSI escape codes used by the theme.
pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const DARK_GRAY: &str = "\x1b[90m";
    pub const BOLD: &str = "\x1b[1m";
}

/// CLI color theme.
///
/// When `enabled` is false every helper returns the text unchanged, so
/// piped output stays clean.
#[derive(Debug, Clone)]
pub struct Theme {
    pub enabled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::auto()
    }
}

impl Theme {
    /// Theme that colors only when stdout is a terminal and `NO_COLOR` is unset.
    pub fn auto() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout),
        }
    }

    /// Theme with colors unconditionally off.
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("{}{}{}", code, text, ansi::RESET)
        } else {
            text.to_string()
        }
    }

    /// Primary content - left uncolored so it matches the terminal default.
    pub fn primary_text(&self, text: &str) -> String {
        text.to_string()
    }

    /// Dimmed hints and progress notes.
    pub fn secondary_text(&self, text: &str) -> String {
        self.paint(ansi::DARK_GRAY, text)
    }

    /// Highlighted values (paths, session IDs).
    pub fn accent_text(&self, text: &str) -> String {
        self.paint(ansi::CYAN, text)
    }

    /// Success messages.
    pub fn success_text(&self, text: &str) -> String {
        self.paint(ansi::GREEN, text)
    }

    /// Warnings (stopping, in-progress states).
    pub fn warning_text(&self, text: &str) -> String {
        self.paint(ansi::YELLOW, text)
    }

    /// Error messages.
    pub fn error_text(&self, text: &str) -> String {
        self.paint(ansi::RED, text)
    }

    /// Bold header text.
    pub fn bold_text(&self, text: &str) -> String {
        self.paint(ansi::BOLD, text)
    }
}

/// Global theme instance.
pub fn current_theme() -> Theme {
    Theme::auto()
}
