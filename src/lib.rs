//! Core library for `build_cleanup`.
//!
//! Reliable deletion of intermediate build directories: a single path via
//! [`safe_remove_tree`], or every directory recorded in a build-result tree
//! via [`cleanup_build_files`].

pub mod cleanup;
pub mod cli;
pub mod config;
pub mod errors;
pub mod output;
pub mod platform;
pub mod remove;
pub mod shutdown;

pub use cleanup::{
    cleanup_build_files, cleanup_build_files_with, load_manifest, BuildResult, CleanupReport, NodeFailure,
};
pub use config::{
    default_config_path, default_log_path, load_config, load_config_from_xml_path, path_has_symlink_ancestor,
    CleanupPolicy, Config, LogLevel, RemoveOptions,
};
pub use errors::{CleanupError, RemoveError};
pub use remove::{safe_remove_tree, safe_remove_tree_with, EntryOps, ProcessCwd, RemoveOps, StdOps, WorkingDir};
