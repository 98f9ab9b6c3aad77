//! Robust removal of build directory trees.
//!
//! `safe_remove_tree` sequences the strategies:
//! guard the working directory, pre-clean `.git`, relocate to trash, sweep
//! with repair and retries, then `rm -rf` on POSIX. Auxiliary failures are
//! logged at debug level and never surface; only the final outcome does.

mod guard;
mod helpers;
mod ops;
mod shell;
mod trash;
mod tree;

pub use guard::{guard_cwd, GuardOutcome, ProcessCwd, WorkingDir};
pub use ops::{EntryOps, RemoveOps, StdOps};
pub use shell::{shell_fallback, ShellOutcome};
pub use trash::{relocate_to_trash, trash_path, MoveStrategy, Relocation, TRASH_PREFIX};
pub use tree::{delete_tree, preclean_vcs, sweep_tree, sweep_tree_with, Attempt, StepOutcome, Sweep, TreeOutcome, VCS_DIR};

use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::RemoveOptions;
use crate::errors::CleanupError;

/// Remove `path` with the real filesystem and process working directory.
///
/// Returns `Ok(true)` when the path is gone (or never existed), `Ok(false)`
/// when every strategy failed and `opts.ignore_errors` is set, and
/// [`CleanupError::RemoveFailed`] naming `path` otherwise.
pub fn safe_remove_tree(path: &Path, opts: &RemoveOptions) -> Result<bool, CleanupError> {
    safe_remove_tree_with(&StdOps, &ProcessCwd, path, opts)
}

/// [`safe_remove_tree`] with injected primitives and working-directory context.
pub fn safe_remove_tree_with(
    ops: &dyn RemoveOps,
    cwd: &dyn WorkingDir,
    path: &Path,
    opts: &RemoveOptions,
) -> Result<bool, CleanupError> {
    if !ops.exists(path) {
        debug!(path = %path.display(), "nothing to remove");
        return Ok(true);
    }
    if opts.dry_run {
        info!(path = %path.display(), "dry-run: would remove build path");
        return Ok(true);
    }

    let anchored = anchor(path);
    let path_abs = anchored.as_path();

    match guard_cwd(cwd, path_abs) {
        GuardOutcome::Moved { from, to } => {
            info!(from = %from.display(), to = %to.display(), "left working directory inside target")
        }
        GuardOutcome::Skipped(e) => debug!(path = %path.display(), error = %e, "cwd guard skipped"),
        GuardOutcome::Unchanged => {}
    }

    if let StepOutcome::Failed(e) = preclean_vcs(ops, path_abs) {
        debug!(path = %path.display(), error = %e, "VCS pre-clean failed; continuing");
    }

    let relocation = relocate_to_trash(ops, path_abs);
    let target = relocation.target.as_path();

    let outcome = delete_tree(ops, target, opts.retries, opts.delay);
    if !outcome.is_removed() && ops.exists(target) && opts.shell_fallback {
        // Unsupported platforms simply fall through to the final check.
        let _ = shell_fallback(ops, target);
    }

    if !ops.exists(target) {
        info!(
            path = %path.display(),
            relocated = relocation.relocated,
            "Removed build path"
        );
        return Ok(true);
    }

    if relocation.relocated {
        warn!(trash = %target.display(), "abandoned trash directory left behind");
    }
    if opts.ignore_errors {
        warn!(path = %path.display(), "giving up on build path");
        Ok(false)
    } else {
        let err = CleanupError::RemoveFailed(path.to_path_buf());
        error!(code = err.code(), kind = "remove_failed", path = %path.display(), "giving up on build path");
        Err(err)
    }
}

/// Absolute form of `path` that still names the same entry after the guard
/// changes directory. The last component is kept verbatim so a symlinked
/// target is unlinked rather than resolved.
fn anchor(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            dunce::canonicalize(parent)
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()),
    }
}
