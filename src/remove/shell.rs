//! Last-resort removal through the OS's own `rm -rf` (POSIX only).

use std::path::Path;
use tracing::{debug, warn};

use crate::platform::SHELL_FALLBACK_SUPPORTED;

use super::ops::RemoveOps;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    Removed,
    Failed(String),
    Unsupported,
}

/// Run the forced remove and trust it only if the path is really gone.
pub fn shell_fallback(ops: &dyn RemoveOps, target: &Path) -> ShellOutcome {
    if !SHELL_FALLBACK_SUPPORTED {
        return ShellOutcome::Unsupported;
    }
    debug!(path = %target.display(), "falling back to rm -rf");
    let outcome = match ops.forced_remove(target) {
        Ok(status) if !status.success() => ShellOutcome::Failed(format!("rm -rf exited with {status}")),
        Ok(_) if ops.exists(target) => ShellOutcome::Failed("rm -rf succeeded but the path remains".into()),
        Ok(_) => ShellOutcome::Removed,
        Err(e) => ShellOutcome::Failed(format!("could not run rm -rf: {e}")),
    };
    if let ShellOutcome::Failed(reason) = &outcome {
        warn!(path = %target.display(), %reason, "shell fallback failed");
    }
    outcome
}
