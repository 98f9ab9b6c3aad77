//! Touches the real process working directory; kept alone in its own binary.

use build_cleanup::{safe_remove_tree, RemoveOptions};
use serial_test::serial;
use std::env;
use std::fs;

#[test]
#[serial]
fn removes_directory_we_are_standing_in() {
    let td = tempfile::tempdir().unwrap();
    let build = td.path().join("opencv-build");
    let nested = build.join("modules").join("core");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("precomp.hpp.gch"), b"pch").unwrap();

    let original = env::current_dir().unwrap();
    env::set_current_dir(&nested).unwrap();

    let removed = safe_remove_tree(&build, &RemoveOptions::strict());

    let now = env::current_dir().unwrap();
    // Restore before asserting so a failure does not strand later tests.
    let _ = env::set_current_dir(&original);

    assert!(removed.unwrap());
    assert!(!build.exists());
    assert!(!now.starts_with(&build), "cwd still inside removed tree: {}", now.display());
}
