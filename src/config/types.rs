//! Core configuration types.
//! - RemoveOptions tunes a single safe_remove_tree call.
//! - Config adds the tree policy and logging on top.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::{DEFAULT_DELAY, DEFAULT_RETRIES};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    #[default]
    Normal,
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        })
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Knobs for one `safe_remove_tree` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Whole-tree sweeps before giving up on in-process removal.
    pub retries: u32,
    /// Base backoff; attempt `n` waits `delay * n` after failing.
    pub delay: Duration,
    /// Return `Ok(false)` instead of an error when everything failed.
    pub ignore_errors: bool,
    /// Allow `rm -rf` as the last resort on POSIX.
    pub shell_fallback: bool,
    /// Log what would be removed without touching the filesystem.
    pub dry_run: bool,
}

impl Default for RemoveOptions {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            delay: DEFAULT_DELAY,
            ignore_errors: true,
            shell_fallback: true,
            dry_run: false,
        }
    }
}

impl RemoveOptions {
    /// Strict variant: exhausted removals become errors.
    pub fn strict() -> Self {
        Self {
            ignore_errors: false,
            ..Self::default()
        }
    }
}

/// What a build-tree cleanup does after one node fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPolicy {
    /// Record the failure and keep cleaning the remaining nodes.
    #[default]
    ContinueOnError,
    /// Stop at the first failed node and report it as an error.
    FailFast,
}

/// Runtime configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub remove: RemoveOptions,
    pub policy: CleanupPolicy,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}
