//! I/O error enrichment.
//!
//! Deletion failures are rarely self-explanatory ("Directory not empty",
//! "Access is denied"). These adapters add the operation, the path and a
//! platform-aware hint while preserving the original `ErrorKind`.
//!
//! Usage:
//!   fs::remove_file(p).map_err(io_error_with_help_io("remove file", p))?;

use std::io;
use std::path::Path;

/// Format a human-friendly message with op/path plus a hint for common causes.
pub(crate) fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            match code {
                libc::EACCES | libc::EPERM => {
                    msg.push_str(" - permission denied; check ownership and the parent directory's write bit.");
                }
                libc::EBUSY => {
                    msg.push_str(" - resource busy; a mount point or another process may hold it.");
                }
                libc::ENOTEMPTY | libc::EEXIST => {
                    msg.push_str(" - directory not empty; something may still be writing into it.");
                }
                libc::EXDEV => {
                    msg.push_str(" - cross-filesystem; atomic rename not possible.");
                }
                libc::EROFS => {
                    msg.push_str(" - read-only filesystem; nothing can be removed here.");
                }
                libc::ENAMETOOLONG => {
                    msg.push_str(" - path too long.");
                }
                libc::EMFILE | libc::ENFILE => {
                    msg.push_str(" - too many open files.");
                }
                _ => {}
            }
        }
        #[cfg(windows)]
        {
            match code {
                5 => msg.push_str(" - access denied; the entry may be read-only or open in another process."), // ERROR_ACCESS_DENIED
                17 => msg.push_str(" - not same device; cross-volume move."), // ERROR_NOT_SAME_DEVICE
                32 | 33 => msg.push_str(" - sharing violation; file is in use (antivirus, indexer, IDE)."), // SHARING / LOCK VIOLATION
                145 => msg.push_str(" - directory not empty; something may still be writing into it."), // ERROR_DIR_NOT_EMPTY
                206 => msg.push_str(" - path too long (MAX_PATH exceeded)."), // ERROR_FILENAME_EXCED_RANGE
                _ => {}
            }
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => {
                msg.push_str(" - permission denied; check ownership and the parent directory's write bit.");
            }
            io::ErrorKind::NotFound => {
                msg.push_str(" - path not found; it may have been removed concurrently.");
            }
            io::ErrorKind::Unsupported => {
                msg.push_str(" - not supported on this platform.");
            }
            _ => {}
        }
    }

    msg
}

/// Returns a closure suitable for `.map_err(...)` that keeps the `ErrorKind`
/// and enriches the message.
pub(crate) fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), describe_io_error(op, path, &e))
}

/// EXDEV / ERROR_NOT_SAME_DEVICE: std has no stable ErrorKind for it.
pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17,
        #[cfg(not(any(unix, windows)))]
        Some(_) => false,
        None => false,
    }
}
