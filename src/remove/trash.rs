//! Trash relocation.
//!
//! The target is moved whole to a uniquely named directory under the system
//! temp dir before deletion. Retries then run on a private path, and the
//! original name is free immediately for the next build even if the final
//! delete drags on or is abandoned.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;
use walkdir::WalkDir;

use crate::platform::copy_symlink;

use super::helpers::{io_error_with_help_io, is_cross_device};
use super::ops::RemoveOps;
use super::tree::sweep_tree;

pub const TRASH_PREFIX: &str = "build-trash-";

static COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStrategy {
    Rename,
    CopyAndRemove,
}

/// Where deletion should now aim.
#[derive(Debug, Clone)]
pub struct Relocation {
    pub target: PathBuf,
    pub relocated: bool,
    pub strategy: Option<MoveStrategy>,
}

impl Relocation {
    fn in_place(path: &Path) -> Self {
        Self {
            target: path.to_path_buf(),
            relocated: false,
            strategy: None,
        }
    }
}

/// Pattern: <parent>/build-trash-<pid>-<nanos>-<seq>
pub fn trash_path(parent: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    parent.join(format!("{TRASH_PREFIX}{pid}-{nanos}-{seq}"))
}

/// Move `path` into the temp dir: rename first, copy-and-remove second.
/// Any failure leaves `path` as the deletion target.
pub fn relocate_to_trash(ops: &dyn RemoveOps, path: &Path) -> Relocation {
    let trash_parent = env::temp_dir();
    if trash_lies_inside(&trash_parent, path) {
        debug!(path = %path.display(), "temp dir is inside the target; deleting in place");
        return Relocation::in_place(path);
    }
    let trash = trash_path(&trash_parent);

    let rename_err = match ops.rename(path, &trash) {
        Ok(()) => {
            debug!(src = %path.display(), trash = %trash.display(), "renamed into trash");
            return Relocation {
                target: trash,
                relocated: true,
                strategy: Some(MoveStrategy::Rename),
            };
        }
        Err(e) => e,
    };
    debug!(
        path = %path.display(),
        cross_device = is_cross_device(&rename_err),
        error = %rename_err,
        "rename into trash failed; trying copy and remove"
    );

    match ops.move_by_copy(path, &trash) {
        Ok(()) => {
            debug!(src = %path.display(), trash = %trash.display(), "copied into trash");
            Relocation {
                target: trash,
                relocated: true,
                strategy: Some(MoveStrategy::CopyAndRemove),
            }
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "relocation failed; deleting in place");
            Relocation::in_place(path)
        }
    }
}

fn trash_lies_inside(trash_parent: &Path, path: &Path) -> bool {
    match (dunce::canonicalize(trash_parent), dunce::canonicalize(path)) {
        (Ok(parent), Ok(target)) => parent.starts_with(target),
        _ => false,
    }
}

/// Copy `src` to `dst` (which must not exist), then remove `src`.
/// On failure the partial copy is swept away best-effort.
pub(crate) fn copy_then_remove(src: &Path, dst: &Path) -> io::Result<()> {
    if let Err(e) = copy_tree(src, dst) {
        let _ = sweep_tree(dst);
        return Err(e);
    }
    if let Err(e) = sweep_tree(src) {
        // Source is now partly gone; keep deleting it in place and drop the copy.
        let _ = sweep_tree(dst);
        return Err(e.into());
    }
    Ok(())
}

fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(src).map_err(io_error_with_help_io("stat", src))?;
    if meta.file_type().is_symlink() {
        return copy_symlink(src, dst);
    }
    if !meta.is_dir() {
        fs::copy(src, dst).map_err(io_error_with_help_io("copy file into trash", dst))?;
        return Ok(());
    }

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(io::Error::from)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let dest = if rel.as_os_str().is_empty() {
            dst.to_path_buf()
        } else {
            dst.join(rel)
        };
        let ft = entry.file_type();
        if ft.is_dir() {
            fs::create_dir_all(&dest).map_err(io_error_with_help_io("create trash directory", &dest))?;
        } else if ft.is_symlink() {
            copy_symlink(entry.path(), &dest)?;
        } else {
            fs::copy(entry.path(), &dest).map_err(io_error_with_help_io("copy file into trash", &dest))?;
        }
    }
    Ok(())
}
