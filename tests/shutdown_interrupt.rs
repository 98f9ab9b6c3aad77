//! Lives in its own test binary: the shutdown flag is process-wide and one-way.

use build_cleanup::{cleanup_build_files_with, shutdown, BuildResult, CleanupPolicy};

#[test]
fn requested_shutdown_stops_tree_traversal() {
    shutdown::request();
    let tree = BuildResult::new(Some("a")).with_sub_lib("b", BuildResult::new(Some("b")));
    let mut calls = 0;
    let report = cleanup_build_files_with(Some(&tree), CleanupPolicy::ContinueOnError, |_| {
        calls += 1;
        Ok(true)
    })
    .unwrap();
    assert_eq!(calls, 0);
    assert!(report.interrupted);
    assert!(!report.is_clean());
}
