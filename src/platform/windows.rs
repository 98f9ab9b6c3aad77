//! Windows implementations of platform helpers (best-effort, no ACL management).
//!
//! Notes:
//! - Windows lacks POSIX mode semantics; "owner writable" means clearing the
//!   read-only attribute.
//! - There is no native forced-remove command we rely on here.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::process::ExitStatus;

/// Open log file for appending (best-effort; no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Clear the read-only attribute on `path`.
pub fn set_owner_writable(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    let mut perms = meta.permissions();
    if !perms.readonly() {
        return Ok(());
    }
    perms.set_readonly(false);
    fs::set_permissions(path, perms)
}

/// Symlink creation needs elevated rights on most Windows setups; report it
/// so the caller falls back to deleting in place.
pub fn copy_symlink(src: &Path, _dst: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot recreate symlink '{}' on this platform", src.display()),
    ))
}

pub fn run_forced_remove(_path: &Path) -> io::Result<ExitStatus> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "no native forced-remove fallback on this platform",
    ))
}
