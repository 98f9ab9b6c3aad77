#![cfg(unix)]

use build_cleanup::remove::{safe_remove_tree_with, ProcessCwd, RemoveOps, Sweep};
use build_cleanup::{CleanupError, RemoveError, RemoveOptions};
use std::cell::Cell;
use std::fs;
use std::io;
use std::path::Path;
use std::process::ExitStatus;
use std::time::Duration;
use tempfile::tempdir;

/// Every in-process sweep fails; relocation is refused so the tree stays in the tempdir.
struct Stubborn {
    shell_works: bool,
    shell_calls: Cell<u32>,
}

impl RemoveOps for Stubborn {
    fn rename(&self, _from: &Path, _to: &Path) -> io::Result<()> {
        Err(io::Error::other("rename refused"))
    }

    fn move_by_copy(&self, _from: &Path, _to: &Path) -> io::Result<()> {
        Err(io::Error::other("copy refused"))
    }

    fn remove_tree(&self, path: &Path) -> Result<Sweep, RemoveError> {
        Err(RemoveError::Unrepairable {
            path: path.to_path_buf(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        })
    }

    fn forced_remove(&self, path: &Path) -> io::Result<ExitStatus> {
        self.shell_calls.set(self.shell_calls.get() + 1);
        if self.shell_works {
            build_cleanup::platform::run_forced_remove(path)
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "rm: command not found"))
        }
    }

    fn sleep(&self, _delay: Duration) {}
}

fn seed(root: &Path) {
    fs::create_dir_all(root.join("out")).unwrap();
    fs::write(root.join("out/libsdbus-c++.so"), b"so").unwrap();
}

fn quick() -> RemoveOptions {
    RemoveOptions {
        retries: 2,
        delay: Duration::from_millis(1),
        ..RemoveOptions::default()
    }
}

#[test]
fn shell_fallback_rescues_exhausted_retries() {
    let td = tempdir().unwrap();
    let build = td.path().join("sdbus-cpp");
    seed(&build);

    let ops = Stubborn { shell_works: true, shell_calls: Cell::new(0) };
    assert!(safe_remove_tree_with(&ops, &ProcessCwd, &build, &quick()).unwrap());
    assert_eq!(ops.shell_calls.get(), 1);
    assert!(!build.exists());
}

#[test]
fn total_failure_returns_false_when_ignoring_errors() {
    let td = tempdir().unwrap();
    let build = td.path().join("sdbus-cpp");
    seed(&build);

    let ops = Stubborn { shell_works: false, shell_calls: Cell::new(0) };
    let res = safe_remove_tree_with(&ops, &ProcessCwd, &build, &quick());
    assert!(!res.unwrap());
    assert!(build.exists());
}

#[test]
fn total_failure_raises_with_original_path_when_strict() {
    let td = tempdir().unwrap();
    let build = td.path().join("sdbus-cpp");
    seed(&build);

    let ops = Stubborn { shell_works: false, shell_calls: Cell::new(0) };
    let opts = RemoveOptions { ignore_errors: false, ..quick() };
    let err = safe_remove_tree_with(&ops, &ProcessCwd, &build, &opts).unwrap_err();
    match &err {
        CleanupError::RemoveFailed(p) => assert_eq!(p, &build),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("sdbus-cpp"));
}

#[test]
fn disabled_shell_fallback_is_not_run() {
    let td = tempdir().unwrap();
    let build = td.path().join("sdbus-cpp");
    seed(&build);

    let ops = Stubborn { shell_works: true, shell_calls: Cell::new(0) };
    let opts = RemoveOptions { shell_fallback: false, ..quick() };
    assert!(!safe_remove_tree_with(&ops, &ProcessCwd, &build, &opts).unwrap());
    assert_eq!(ops.shell_calls.get(), 0);
}
