//! Shared helpers for integration tests

use std::path::{Path, PathBuf};
use std::process::Command;

/// Directory holding checked-in transcript fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Read a fixture file as a string.
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("Failed to read fixture {}: {err}", path.display()))
}

/// Run the fixtrace CLI against an isolated store root and capture output.
///
/// `FIXTRACE_HOME` points the store at `home`, `XDG_CONFIG_HOME` keeps the
/// config lookup away from the real user config, and `NO_COLOR` keeps the
/// output free of escape codes. `GEMINI_API_KEY` is cleared so no test can
/// reach the network.
pub fn run_fixtrace(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_fixtrace"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("FIXTRACE_HOME", home)
        .env("XDG_CONFIG_HOME", home.join("xdg-config"))
        .env_remove("GEMINI_API_KEY")
        .output()
        .expect("Failed to execute fixtrace");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
