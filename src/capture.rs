//! Recording engine around script(1).
//!
//! `script` does the heavy lifting: it allocates a pty, runs the user's
//! shell on it, and appends every byte to the raw transcript. The
//! recorder spawns it with inherited stdio so the user keeps their
//! terminal, and in a fresh session (setsid) so terminal signals reach
//! the recorded shell rather than tearing down the recorder chain.
//!
//! Stopping happens by pid from another process entirely, since
//! `fixtrace stop` runs in a different terminal than `fixtrace start`.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

#[cfg(unix)]
use std::os::unix::process::CommandExt;

/// Grace period after SIGTERM for script to flush and close the
/// transcript.
const TERM_GRACE: Duration = Duration::from_millis(500);

/// A running `script` capture.
pub struct Recorder {
    child: Child,
    raw_path: PathBuf,
}

impl Recorder {
    /// Start recording the user's shell to `raw_path`.
    pub fn spawn(raw_path: &Path) -> Result<Self> {
        let mut command = Command::new("script");
        command.arg("-q").arg(flush_flag()).arg(raw_path);

        // New session: Ctrl-C in the recorded shell must not propagate
        // up through the process group to the recorder.
        #[cfg(unix)]
        unsafe {
            command.pre_exec(|| {
                if libc::setsid() == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }

        let child = command
            .spawn()
            .context("starting script, is util-linux/bsdutils installed?")?;

        tracing::debug!(pid = child.id(), raw = %raw_path.display(), "recording started");
        Ok(Self {
            child,
            raw_path: raw_path.to_path_buf(),
        })
    }

    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }

    /// Block until the recorded shell exits, whether by the user typing
    /// `exit` or by [`terminate`] from another process.
    pub fn wait(&mut self) -> Result<ExitStatus> {
        self.child.wait().context("waiting for script to finish")
    }
}

/// `script` flushes per write with `-f` on Linux, `-F` on macOS.
fn flush_flag() -> &'static str {
    if cfg!(target_os = "macos") {
        "-F"
    } else {
        "-f"
    }
}

/// Politely stop a recording by pid, then give script a moment to flush
/// the transcript. A pid that no longer exists is not an error; the
/// recording already ended on its own.
pub fn terminate(pid: u32) {
    // kill(2) treats 0 and negative pids as group addressing. A marker
    // file should never produce one, but never forward such a value.
    if pid == 0 || pid > i32::MAX as u32 {
        tracing::warn!(pid, "refusing to signal out-of-range pid");
        return;
    }

    #[cfg(unix)]
    {
        let ret = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
        if ret == -1 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() != Some(libc::ESRCH) {
                tracing::warn!(pid, error = %err, "could not signal recording process");
            }
        }
        thread::sleep(TERM_GRACE);
    }

    #[cfg(not(unix))]
    {
        tracing::warn!(pid, "stopping by pid is only supported on unix");
    }
}

/// Stop the recording after a wall-clock limit. The waiting `start`
/// process observes the resulting exit and finalizes as usual.
pub fn spawn_watchdog(pid: u32, limit: Duration) {
    thread::spawn(move || {
        thread::sleep(limit);
        tracing::info!(pid, ?limit, "recording time limit reached");
        terminate(pid);
    });
}
