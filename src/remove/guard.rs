//! Working-directory guard.
//!
//! A directory that is some process's current directory can refuse removal
//! (Windows) or be left half-deleted. Before deleting we step out of the
//! target if we are standing inside it.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// The working-directory context the guard reads and may change.
pub trait WorkingDir {
    fn current(&self) -> io::Result<PathBuf>;
    fn change_to(&self, dir: &Path) -> io::Result<()>;
}

/// The calling process's real current directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessCwd;

impl WorkingDir for ProcessCwd {
    fn current(&self) -> io::Result<PathBuf> {
        env::current_dir()
    }

    fn change_to(&self, dir: &Path) -> io::Result<()> {
        env::set_current_dir(dir)
    }
}

#[derive(Debug)]
pub enum GuardOutcome {
    /// The working directory was not inside the target.
    Unchanged,
    /// We were inside the target and moved to `to`.
    Moved { from: PathBuf, to: PathBuf },
    /// Paths could not be resolved or the change failed; deletion goes ahead anyway.
    Skipped(io::Error),
}

/// Move `cwd` to the system temp directory if it is `target` or below it.
pub fn guard_cwd(cwd: &dyn WorkingDir, target: &Path) -> GuardOutcome {
    match step_out(cwd, target) {
        Ok(Some((from, to))) => GuardOutcome::Moved { from, to },
        Ok(None) => GuardOutcome::Unchanged,
        Err(e) => GuardOutcome::Skipped(e),
    }
}

fn step_out(cwd: &dyn WorkingDir, target: &Path) -> io::Result<Option<(PathBuf, PathBuf)>> {
    let current = dunce::canonicalize(cwd.current()?)?;
    let target = dunce::canonicalize(target)?;
    // Component-wise: "/build/zlib-old" is not inside "/build/zlib".
    if !current.starts_with(&target) {
        return Ok(None);
    }
    let refuge = env::temp_dir();
    cwd.change_to(&refuge)?;
    Ok(Some((current, refuge)))
}
