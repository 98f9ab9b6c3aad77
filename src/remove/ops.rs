//! Primitive operations the removal pipeline is built from.
//!
//! Every method has a real default implementation, so production code uses
//! the empty [`StdOps`] while tests override only the primitive they want to
//! make fail (a rename, one sweep, the subprocess) or observe (sleeps).

use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitStatus;
use std::time::Duration;

use crate::errors::RemoveError;
use crate::platform;
use crate::platform::set_owner_writable;

use super::trash::copy_then_remove;
use super::tree::{sweep_tree, Sweep};

pub trait RemoveOps {
    /// Existence without following a final symlink; a dangling link still counts.
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    /// Atomic move; only succeeds within one filesystem/volume.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    /// Generic move for when `rename` is refused (e.g. cross-device).
    fn move_by_copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        copy_then_remove(from, to)
    }

    /// One full sweep with the per-entry repair hook.
    fn remove_tree(&self, path: &Path) -> Result<Sweep, RemoveError> {
        sweep_tree(path)
    }

    /// The OS's recursive forced remove, as a subprocess.
    fn forced_remove(&self, path: &Path) -> io::Result<ExitStatus> {
        platform::run_forced_remove(path)
    }

    fn sleep(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Per-entry primitives used inside one sweep.
pub trait EntryOps {
    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    /// Repair hook run once on an entry whose removal failed.
    fn make_writable(&self, path: &Path) -> io::Result<()> {
        set_owner_writable(path)
    }
}

/// The real filesystem, subprocesses and clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdOps;

impl RemoveOps for StdOps {}

impl EntryOps for StdOps {}
