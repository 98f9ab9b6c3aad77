//! Typed error definitions for build_cleanup.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanupError {
    /// Every strategy was exhausted and the build path still exists.
    #[error("Could not delete build path: {}", .0.display())]
    RemoveFailed(PathBuf),

    #[error("Invalid build manifest {}: {context}", path.display())]
    ManifestInvalid { path: PathBuf, context: String },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl CleanupError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> i32 {
        match self {
            CleanupError::RemoveFailed(_) => 10,
            CleanupError::ManifestInvalid { .. } => 20,
            CleanupError::Interrupted => 130,
        }
    }
}

/// Why a single sweep over a tree did not leave it empty.
#[derive(Debug, Error)]
pub enum RemoveError {
    /// A directory could not be listed while sweeping.
    #[error("cannot read '{}' while sweeping: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Removal failed even after the read-only bit was cleared.
    #[error("cannot remove '{}' after clearing read-only: {source}", path.display())]
    Unrepairable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The sweep reported no error but the target is still there.
    #[error("'{}' still exists after sweeping", .0.display())]
    Survived(PathBuf),
}

impl RemoveError {
    /// Repair-and-retry was attempted on the failing entry.
    pub fn is_repair_failure(&self) -> bool {
        matches!(self, RemoveError::Unrepairable { .. })
    }
}

impl From<RemoveError> for io::Error {
    fn from(e: RemoveError) -> Self {
        match e {
            RemoveError::Walk { source, .. } | RemoveError::Unrepairable { source, .. } => source,
            RemoveError::Survived(path) => io::Error::other(format!(
                "'{}' still exists after sweeping",
                path.display()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_failed_names_original_path() {
        let e = CleanupError::RemoveFailed(PathBuf::from("/work/build/zlib"));
        assert_eq!(e.to_string(), "Could not delete build path: /work/build/zlib");
        assert_eq!(e.code(), 10);
    }

    #[test]
    fn unrepairable_keeps_io_kind() {
        let e = RemoveError::Unrepairable {
            path: PathBuf::from("x"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert!(e.is_repair_failure());
        let io: io::Error = e.into();
        assert_eq!(io.kind(), io::ErrorKind::PermissionDenied);
    }
}
