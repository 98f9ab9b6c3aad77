//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler, and
//! runs `remove` or `tree`.

use anyhow::{anyhow, bail, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use build_cleanup::cli::{Args, Command};
use build_cleanup::output as out;
use build_cleanup::{
    cleanup_build_files_with, default_config_path, default_log_path, load_config, load_manifest, safe_remove_tree, shutdown,
    CleanupError, Config,
};

use crate::logging::init_tracing;

pub fn run(args: Args) -> Result<()> {
    if args.print_config {
        print_config_location();
        return Ok(());
    }
    let Some(command) = args.command.clone() else {
        bail!("no command given; use `remove <PATH>...` or `tree <MANIFEST>` (see --help)");
    };

    let mut cfg = load_config()?;
    args.apply_overrides(&mut cfg);
    cfg.validate()?;

    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Dropped on SIGINT or at the end of run to flush the file appender.
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current deletion...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("install Ctrl-C handler")?;
    }

    debug!("Starting build_cleanup: {:?}", args);

    let result = match &command {
        Command::Remove { paths } => run_remove(&cfg, paths),
        Command::Tree { manifest } => run_tree(&cfg, manifest),
    };

    if let Err(e) = &result {
        log_failure(e);
    }
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    result
}

fn print_config_location() {
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("build_cleanup config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file there; built-in defaults apply.");
            }
            out::print_info("Set BUILD_CLEANUP_CONFIG to use another file.");
        }
        None => out::print_error("Could not determine a default config path."),
    }
    if let Some(log) = default_log_path() {
        out::print_info(&format!("Suggested <log_file> location:\n  {}", log.display()));
    }
}

fn run_remove(cfg: &Config, paths: &[PathBuf]) -> Result<()> {
    let mut failed = Vec::new();
    for path in paths {
        if shutdown::is_requested() {
            return Err(CleanupError::Interrupted.into());
        }
        match safe_remove_tree(path, &cfg.remove) {
            Ok(true) if cfg.remove.dry_run => out::print_user(&format!("Would remove {}", path.display())),
            Ok(true) => out::print_user(&format!("Removed {}", path.display())),
            Ok(false) => {
                out::print_warn(&format!("Could not delete build path: {}", path.display()));
                failed.push(path.clone());
            }
            Err(e) => return Err(e.into()),
        }
    }
    if !failed.is_empty() {
        bail!("{} of {} path(s) could not be removed", failed.len(), paths.len());
    }
    Ok(())
}

fn run_tree(cfg: &Config, manifest: &Path) -> Result<()> {
    let result = load_manifest(manifest)?;
    if result.is_none() {
        info!(manifest = %manifest.display(), "manifest holds no build result; nothing to clean");
    }
    let report = cleanup_build_files_with(result.as_ref(), cfg.policy, |p| safe_remove_tree(p, &cfg.remove))?;

    for p in &report.removed {
        let verb = if cfg.remove.dry_run { "Would remove" } else { "Removed" };
        out::print_user(&format!("{verb} {}", p.display()));
    }
    for f in &report.failed {
        let label = if f.library.is_empty() { "<root>" } else { f.library.as_str() };
        out::print_warn(&format!("{label}: {} ({})", f.path.display(), f.reason));
    }
    if report.interrupted {
        return Err(CleanupError::Interrupted.into());
    }
    if !report.failed.is_empty() && !cfg.remove.ignore_errors {
        return Err(anyhow!(
            "{} build path(s) could not be removed",
            report.failed.len()
        ));
    }
    if report.is_clean() {
        out::print_success(&format!("Cleaned {} build path(s)", report.removed.len()));
    }
    Ok(())
}

fn log_failure(e: &anyhow::Error) {
    match e.downcast_ref::<CleanupError>() {
        Some(ce @ CleanupError::RemoveFailed(path)) => {
            error!(code = ce.code(), kind = "remove_failed", path = %path.display(), "Cleanup failed")
        }
        Some(ce @ CleanupError::ManifestInvalid { path, context }) => {
            error!(code = ce.code(), kind = "manifest_invalid", path = %path.display(), %context, "Cleanup failed")
        }
        Some(ce @ CleanupError::Interrupted) => {
            error!(code = ce.code(), kind = "interrupted", "Cleanup aborted by user")
        }
        None => error!(error = ?e, "Cleanup failed"),
    }
}
