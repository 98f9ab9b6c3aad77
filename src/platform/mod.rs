//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the deletion code can remain platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{copy_symlink, open_log_file_secure_append, run_forced_remove, set_owner_writable};

#[cfg(not(unix))]
pub use windows::{copy_symlink, open_log_file_secure_append, run_forced_remove, set_owner_writable};

/// Whether the OS provides a native recursive forced-remove command we trust.
pub const SHELL_FALLBACK_SUPPORTED: bool = cfg!(unix);
