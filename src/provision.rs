//! Provisioning poller — waits for an App ID to reach a ready status.
//!
//! `diagrid appid get` prints free-form text; readiness is scraped from the
//! first line containing a `Status:` marker. The poll budget is fixed:
//! [`MAX_ATTEMPTS`] queries with [`POLL_DELAY`] between consecutive queries.
//! A query that fails to spawn, exits non-zero, or prints no status line
//! counts against the budget like any pending status — there is no fast
//! path for terminal-failure statuses either, a resource stuck on "failed"
//! is retried until the budget runs out.

use std::time::Duration;

use crate::diagrid::Diagrid;
use crate::error::SetupError;
use crate::output::progress;

/// Maximum number of status queries before giving up.
pub const MAX_ATTEMPTS: u32 = 8;

/// Delay between consecutive status queries.
pub const POLL_DELAY: Duration = Duration::from_secs(10);

/// Statuses that mean provisioning is complete (compared case-insensitively).
const READY_STATUSES: [&str; 2] = ["ready", "available"];

/// Marker scraped out of `appid get` output.
const STATUS_MARKER: &str = "Status:";

/// Transient per-poll bookkeeping. Created when a poll starts, mutated once
/// per attempt, discarded when the poll resolves.
#[derive(Debug)]
struct PollState {
    /// 1-indexed attempt counter. Monotonically increasing, never exceeds
    /// `max_attempts`.
    attempt: u32,
    max_attempts: u32,
    /// Most recently parsed status. Attempts that produce no parseable
    /// status leave it untouched.
    last_status: Option<String>,
    /// App ID being polled.
    target_name: String,
}

impl PollState {
    fn new(target_name: &str) -> Self {
        Self {
            attempt: 1,
            max_attempts: MAX_ATTEMPTS,
            last_status: None,
            target_name: target_name.to_string(),
        }
    }

    /// Advance to the next attempt. Returns `false` once the budget is spent.
    fn advance(&mut self) -> bool {
        if self.attempt >= self.max_attempts {
            return false;
        }
        self.attempt += 1;
        true
    }

    fn record(&mut self, status: String) {
        self.last_status = Some(status);
    }
}

/// Extract the status value from `appid get` output: the first line
/// containing [`STATUS_MARKER`], everything after the marker, trimmed.
#[must_use]
pub fn parse_status(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        line.split_once(STATUS_MARKER)
            .map(|(_, value)| value.trim().to_string())
    })
}

/// Whether a parsed status means provisioning is complete.
#[must_use]
pub fn is_ready(status: &str) -> bool {
    READY_STATUSES
        .iter()
        .any(|ready| status.eq_ignore_ascii_case(ready))
}

/// Poll until `appid` in `project` reports a ready status.
///
/// Succeeds immediately on the attempt where a ready status is observed;
/// remaining budget is not waited out. No delay follows the final attempt.
///
/// # Errors
///
/// Returns [`SetupError::ProvisioningTimeout`] carrying the last observed
/// status once the budget is exhausted.
pub async fn wait_appid_ready<D: Diagrid>(
    diagrid: &D,
    project: &str,
    appid: &str,
    show_progress: bool,
) -> Result<(), SetupError> {
    let pb = show_progress.then(|| {
        progress::spinner(&format!(
            "Waiting for App ID {appid} to become ready. This may take 1-2 minutes..."
        ))
    });

    let mut state = PollState::new(appid);
    loop {
        let status = match diagrid.appid_get(project, appid).await {
            Ok(output) if output.status.success() => {
                parse_status(&String::from_utf8_lossy(&output.stdout))
            }
            // A failed query counts against the budget like a pending status.
            _ => None,
        };

        if let Some(status) = status {
            let ready = is_ready(&status);
            state.record(status);
            if ready {
                if let Some(pb) = pb {
                    progress::finish_ok(&pb, &format!("App ID {appid} is ready"));
                }
                return Ok(());
            }
        }

        if !state.advance() {
            break;
        }
        tokio::time::sleep(POLL_DELAY).await;
    }

    let error = SetupError::ProvisioningTimeout {
        appid: state.target_name,
        last_status: state.last_status,
    };
    if let Some(pb) = pb {
        progress::finish_fail(&pb, &error.to_string());
    }
    Err(error)
}
