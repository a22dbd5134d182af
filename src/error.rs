//! Typed error taxonomy for the setup flow.
//!
//! Every variant is terminal: nothing upstream recovers or retries. The
//! binary prints the message and exits 1. All variants convert to
//! `anyhow::Error` via the `?` operator.

use std::path::PathBuf;
use std::process::Output;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    /// A required external tool is not installed or not on PATH.
    #[error("{tool} was not found.\n\n{instructions}")]
    PrerequisiteMissing {
        tool: &'static str,
        instructions: &'static str,
    },

    /// A one-shot external command exited non-zero.
    #[error("failed to {action}{details}")]
    CommandFailed { action: String, details: String },

    /// The poll budget ran out before the App ID became ready.
    #[error(
        "{appid} is not ready. Once current status {} becomes ready, you can proceed.",
        .last_status.as_deref().unwrap_or("unknown")
    )]
    ProvisioningTimeout {
        appid: String,
        last_status: Option<String>,
    },

    /// A stale dev config file could not be deleted.
    #[error("could not delete config file {}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SetupError {
    /// Build a [`SetupError::CommandFailed`] carrying whatever the child
    /// wrote to stdout and stderr.
    #[must_use]
    pub fn command_failed(action: &str, output: &Output) -> Self {
        let mut details = String::new();
        for stream in [&output.stdout, &output.stderr] {
            let text = String::from_utf8_lossy(stream);
            let text = text.trim();
            if !text.is_empty() {
                details.push('\n');
                details.push_str(text);
            }
        }
        Self::CommandFailed {
            action: action.to_string(),
            details,
        }
    }
}
