//! Help text retrieval.
//!
//! [`HelpSource`] is the seam between the walker and the external program.
//! [`ProcessHelpSource`] runs `<program> <path...> --help` as a child
//! process; tests substitute in-memory sources.

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use help_catalog_core::CommandPath;
use tokio::process::Command;
use tracing::debug;

use crate::error::ProbeError;

/// Default timeout for a single help invocation (seconds).
pub const DEFAULT_HELP_TIMEOUT_SECS: u64 = 30;

/// Produces the raw help text for one command path.
#[async_trait]
pub trait HelpSource: Send + Sync {
    /// Returns the help document for `path` under `program`.
    ///
    /// An `Ok` with empty text is a valid answer meaning "no help".
    async fn fetch_help(&self, program: &str, path: &CommandPath) -> Result<String, ProbeError>;
}

#[async_trait]
impl<T: HelpSource + ?Sized> HelpSource for &T {
    async fn fetch_help(&self, program: &str, path: &CommandPath) -> Result<String, ProbeError> {
        (**self).fetch_help(program, path).await
    }
}

/// Runs the external program with `--help` and captures standard output.
///
/// The exit status is not inspected: whatever the program prints on
/// standard output is its help text. Standard error is only logged.
///
/// The timeout bounds the whole exchange, including reading both pipes to
/// end-of-file, so a background process that inherited the pipes cannot
/// hold the call open.
#[derive(Debug, Clone)]
pub struct ProcessHelpSource {
    timeout: Duration,
}

impl Default for ProcessHelpSource {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_HELP_TIMEOUT_SECS))
    }
}

impl ProcessHelpSource {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl HelpSource for ProcessHelpSource {
    async fn fetch_help(&self, program: &str, path: &CommandPath) -> Result<String, ProbeError> {
        let argv = path.help_argv(program);
        let started = Instant::now();

        let child = Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ProbeError::Spawn)?;

        // Dropping the pending future on expiry drops the child, which kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))?
            .map_err(ProbeError::Wait)?;

        debug!(
            command = ?argv,
            exit_code = ?output.status.code(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Help command finished"
        );

        let stderr_text = String::from_utf8_lossy(&output.stderr);
        if !stderr_text.trim().is_empty() {
            debug!(command = ?argv, stderr = %stderr_text.trim(), "Help command wrote to stderr");
        }

        let text = String::from_utf8(output.stdout)?;
        Ok(text.trim().to_string())
    }
}
