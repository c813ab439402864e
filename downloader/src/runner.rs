//! yt-dlp subprocess runner.
//!
//! Runs one tool process per call, captures stdout/stderr, and turns a
//! non-zero exit into [`ToolError::Exited`] carrying the tool's stderr as-is.
//! Stderr is also forwarded to tracing.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};

use ytgate_shared::config::GateConfig;
use ytgate_shared::errors::{GateResult, ToolError};

use crate::command::ToolAction;

/// Handle for invoking the external download tool.
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: String,
    cookies_path: PathBuf,
    timeout: Duration,
}

impl YtDlp {
    pub fn new(binary: impl Into<String>, cookies_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            cookies_path: cookies_path.into(),
            timeout,
        }
    }

    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(
            config.ytdlp_bin.clone(),
            config.cookies_path.clone(),
            Duration::from_secs(config.ytdlp_timeout_secs),
        )
    }

    /// Fetch the tool's JSON metadata for `url`, returned without interpretation.
    pub async fn info(&self, url: &str) -> GateResult<serde_json::Value> {
        let stdout = self.run(&ToolAction::info(url)).await?;
        let value = serde_json::from_str(stdout.trim())
            .map_err(|e| ToolError::InvalidOutput(format!("expected JSON: {}", e)))?;
        Ok(value)
    }

    /// Resolve the direct media URL(s) for `format`.
    pub async fn direct_url(&self, url: &str, format: &str) -> GateResult<String> {
        let stdout = self.run(&ToolAction::direct_url(url, format)).await?;
        Ok(stdout.trim().to_string())
    }

    /// Download `url` into `output`.
    pub async fn download(&self, url: &str, format: &str, output: &Path) -> GateResult<()> {
        self.run(&ToolAction::download(url, format, output)).await?;
        Ok(())
    }

    /// Run one action to completion and return its stdout.
    pub async fn run(&self, action: &ToolAction) -> GateResult<String> {
        info!("Running {} ({}) for {}", self.binary, action, action.url());

        let child = Command::new(&self.binary)
            .args(action.args(&self.cookies_path))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ToolError::SpawnFailed {
                binary: self.binary.clone(),
                reason: e.to_string(),
            })?;

        // On timeout the child future is dropped, which kills the process.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                warn!("{} ({}) timed out after {:?}", self.binary, action, self.timeout);
                ToolError::Timeout(self.timeout.as_secs())
            })??;

        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stderr.lines() {
            debug!(target: "ytdlp", "{}", line);
        }

        if !output.status.success() {
            warn!("{} ({}) exited with {}", self.binary, action, output.status);
            return Err(ToolError::Exited {
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
