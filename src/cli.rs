//! CLI definition and parsing.
//!
//! Two entry points: `remove <PATH>...` and `tree <MANIFEST>`. Tuning and
//! logging flags are global and override values from config.xml.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::types::{CleanupPolicy, Config, LogLevel};

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Reliably delete intermediate build directories"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Whole-tree removal attempts before the shell fallback.
    #[arg(long, global = true, value_name = "N")]
    pub retries: Option<u32>,

    /// Base backoff in milliseconds; attempt n waits n times this.
    #[arg(long = "delay-ms", global = true, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Fail with an error instead of reporting paths that could not be removed.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Stop a tree cleanup at the first library whose build dir could not be removed.
    #[arg(long, global = true)]
    pub fail_fast: bool,

    /// Never fall back to `rm -rf`.
    #[arg(long, global = true)]
    pub no_shell_fallback: bool,

    /// Show what would be removed without touching the filesystem.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable debug logging (shorthand for --log-level debug).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Print the config file location and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Delete one or more build directories.
    Remove {
        #[arg(required = true, value_hint = ValueHint::DirPath)]
        paths: Vec<PathBuf>,
    },
    /// Delete every build directory recorded in a build-result manifest (JSON).
    Tree {
        #[arg(value_hint = ValueHint::FilePath)]
        manifest: PathBuf,
    },
}

impl Args {
    /// Precedence: --debug > --log-level value > None (use config).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(n) = self.retries {
            cfg.remove.retries = n;
        }
        if let Some(ms) = self.delay_ms {
            cfg.remove.delay = Duration::from_millis(ms);
        }
        if self.strict {
            cfg.remove.ignore_errors = false;
        }
        if self.fail_fast {
            cfg.policy = CleanupPolicy::FailFast;
        }
        if self.no_shell_fallback {
            cfg.remove.shell_fallback = false;
        }
        if self.dry_run {
            cfg.remove.dry_run = true;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
