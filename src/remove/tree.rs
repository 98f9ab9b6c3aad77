//! Recursive removal with a repair hook and bounded, linearly backed-off retries.
//!
//! One sweep walks the tree contents-first and removes entry by entry. A
//! failing entry gets its owner-write bit set and is retried exactly once;
//! a second failure ends the sweep. Whole sweeps are retried up to the
//! configured count, sleeping `delay * attempt` between failed ones.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::RemoveError;

use super::helpers::io_error_with_help_io;
use super::ops::{EntryOps, RemoveOps, StdOps};

/// Version-control metadata removed ahead of the main sweep.
pub const VCS_DIR: &str = ".git";

/// Counters from one successful sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sweep {
    pub removed: usize,
    /// Entries that only went away after repair-and-retry.
    pub repaired: usize,
}

/// Result of an auxiliary step that must never abort the deletion.
#[derive(Debug)]
pub enum StepOutcome {
    Done,
    /// Nothing to do.
    Skipped,
    /// Failed; the caller carries on.
    Failed(RemoveError),
}

/// Result of a single whole-tree attempt.
#[derive(Debug)]
pub enum Attempt {
    Removed { repaired: usize },
    Retryable(RemoveError),
}

#[derive(Debug)]
pub enum TreeOutcome {
    Removed { attempts: u32, repaired: usize },
    Exhausted { attempts: u32, last_error: Option<RemoveError> },
}

impl TreeOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, TreeOutcome::Removed { .. })
    }
}

#[derive(Clone, Copy)]
enum EntryKind {
    Dir,
    NonDir,
}

/// One sweep over `root`. Symlinks are removed, never followed.
pub fn sweep_tree(root: &Path) -> Result<Sweep, RemoveError> {
    sweep_tree_with(&StdOps, root)
}

/// [`sweep_tree`] over injected per-entry primitives.
pub fn sweep_tree_with(ops: &dyn EntryOps, root: &Path) -> Result<Sweep, RemoveError> {
    let mut sweep = Sweep::default();
    let meta = match fs::symlink_metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(sweep),
        Err(e) => {
            return Err(RemoveError::Walk {
                path: root.to_path_buf(),
                source: io_error_with_help_io("stat", root)(e),
            });
        }
    };
    if !meta.is_dir() {
        remove_entry(ops, root, EntryKind::NonDir, &mut sweep)?;
        return Ok(sweep);
    }

    for entry in WalkDir::new(root).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if e.io_error().map(io::Error::kind) == Some(io::ErrorKind::NotFound) {
                    continue;
                }
                let path = e.path().unwrap_or(root).to_path_buf();
                let source = io::Error::from(e);
                return Err(RemoveError::Walk {
                    source: io_error_with_help_io("read directory", &path)(source),
                    path,
                });
            }
        };
        let kind = if entry.file_type().is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::NonDir
        };
        remove_entry(ops, entry.path(), kind, &mut sweep)?;
    }
    Ok(sweep)
}

fn remove_raw(ops: &dyn EntryOps, path: &Path, kind: EntryKind) -> io::Result<()> {
    match kind {
        EntryKind::Dir => ops.remove_dir(path),
        EntryKind::NonDir => ops.remove_file(path),
    }
}

/// Remove one entry, running the repair hook once if the first try fails.
fn remove_entry(ops: &dyn EntryOps, path: &Path, kind: EntryKind, sweep: &mut Sweep) -> Result<(), RemoveError> {
    let first = match remove_raw(ops, path, kind) {
        Ok(()) => {
            sweep.removed += 1;
            return Ok(());
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => e,
    };

    if let Err(e) = ops.make_writable(path) {
        debug!(path = %path.display(), error = %e, "could not clear read-only");
    }
    match remove_raw(ops, path, kind) {
        Ok(()) => {
            debug!(path = %path.display(), first_error = %first, "removed after clearing read-only");
            sweep.removed += 1;
            sweep.repaired += 1;
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RemoveError::Unrepairable {
            path: path.to_path_buf(),
            source: io_error_with_help_io("remove", path)(e),
        }),
    }
}

/// Best-effort removal of `<dir>/.git`, which tooling tends to keep open or read-only.
pub fn preclean_vcs(ops: &dyn RemoveOps, dir: &Path) -> StepOutcome {
    // Never reach through a symlinked target into someone else's checkout.
    if !fs::symlink_metadata(dir).is_ok_and(|m| m.is_dir()) {
        return StepOutcome::Skipped;
    }
    let vcs: PathBuf = dir.join(VCS_DIR);
    if !ops.exists(&vcs) {
        return StepOutcome::Skipped;
    }
    match ops.remove_tree(&vcs) {
        Ok(_) => StepOutcome::Done,
        Err(e) => StepOutcome::Failed(e),
    }
}

fn attempt_once(ops: &dyn RemoveOps, target: &Path) -> Attempt {
    let result = if ops.exists(target) {
        ops.remove_tree(target)
    } else {
        Ok(Sweep::default())
    };
    let gone = !ops.exists(target);
    match result {
        Ok(sweep) if gone => Attempt::Removed {
            repaired: sweep.repaired,
        },
        Err(e) if gone => {
            debug!(path = %target.display(), error = %e, "sweep reported an error but the target is gone");
            Attempt::Removed { repaired: 0 }
        }
        Ok(_) => Attempt::Retryable(RemoveError::Survived(target.to_path_buf())),
        Err(e) => Attempt::Retryable(e),
    }
}

/// Pre-clean VCS metadata, then up to `retries` sweeps of `target`.
pub fn delete_tree(ops: &dyn RemoveOps, target: &Path, retries: u32, delay: Duration) -> TreeOutcome {
    if let StepOutcome::Failed(e) = preclean_vcs(ops, target) {
        debug!(path = %target.display(), error = %e, "VCS pre-clean failed; continuing");
    }

    let mut last_error = None;
    for attempt in 1..=retries {
        match attempt_once(ops, target) {
            Attempt::Removed { repaired } => {
                debug!(path = %target.display(), attempt, repaired, "tree removed");
                return TreeOutcome::Removed {
                    attempts: attempt,
                    repaired,
                };
            }
            Attempt::Retryable(e) => {
                warn!(
                    path = %target.display(),
                    attempt,
                    retries,
                    repair_failed = e.is_repair_failure(),
                    error = %e,
                    "removal attempt failed"
                );
                last_error = Some(e);
                if attempt < retries {
                    let backoff = delay.saturating_mul(attempt);
                    debug!(delay_ms = backoff.as_millis() as u64, "backing off before next attempt");
                    ops.sleep(backoff);
                }
            }
        }
    }
    TreeOutcome::Exhausted {
        attempts: retries,
        last_error,
    }
}
