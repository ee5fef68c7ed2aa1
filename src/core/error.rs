//! Error types for the library saver
//!
//! Every failure of a save attempt surfaces as exactly one [`LibraryError`].
//! Nothing is retried internally.

use crate::library::traits::{AuthorizationStatus, PlatformError, TargetKind};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for a save attempt
#[derive(Error, Debug)]
pub enum LibraryError {
    /// The user has not granted access to the photo library
    #[error("Failed to access Photo library (authorization status: {status})")]
    AccessDenied { status: AuthorizationStatus },

    /// The platform reported an error while creating the album
    #[error("Failed to create album: {0}")]
    AlbumCreationFailed(#[source] PlatformError),

    /// The album creation request succeeded but the album cannot be found
    #[error("Failed to create an album: '{album}' not found after creation")]
    AlbumLookupFailed { album: String },

    /// The platform reported an error while creating or attaching the asset
    #[error("Failed to save video to the library: {0}")]
    AssetCreationFailed(#[source] PlatformError),

    /// The asset is saved, but the temporary source file could not be removed
    #[error("Video saved, but failed to remove temporary file '{}': {source}", path.display())]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Moving the file into the downloads folder failed
    #[error("Failed to move '{}' to '{}': {source}", from.display(), to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No downloads directory is configured and the OS does not report one
    #[error("Could not determine the Downloads directory")]
    DownloadsDirUnavailable,

    /// No photo library binding is available for the requested target
    #[error("No media library backend is available for the {0} target on this platform")]
    BackendUnavailable(TargetKind),

    /// The runtime dropped the save before it ran
    #[error("Save was cancelled before it started")]
    SaveCancelled,
}

impl LibraryError {
    /// Whether the media already reached the library despite the error.
    ///
    /// Only `CleanupFailed` qualifies: the asset is durable, a stray
    /// temporary file is left behind.
    pub fn is_partial(&self) -> bool {
        matches!(self, LibraryError::CleanupFailed { .. })
    }

    /// Short machine-readable name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            LibraryError::AccessDenied { .. } => "AccessDenied",
            LibraryError::AlbumCreationFailed(_) => "AlbumCreationFailed",
            LibraryError::AlbumLookupFailed { .. } => "AlbumLookupFailed",
            LibraryError::AssetCreationFailed(_) => "AssetCreationFailed",
            LibraryError::CleanupFailed { .. } => "CleanupFailed",
            LibraryError::MoveFailed { .. } => "MoveFailed",
            LibraryError::DownloadsDirUnavailable => "DownloadsDirUnavailable",
            LibraryError::BackendUnavailable(_) => "BackendUnavailable",
            LibraryError::SaveCancelled => "SaveCancelled",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_only_cleanup_failure_is_partial() {
        let cleanup = LibraryError::CleanupFailed {
            path: PathBuf::from("/tmp/video.mp4"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(cleanup.is_partial());
        assert!(!LibraryError::DownloadsDirUnavailable.is_partial());
        assert!(!LibraryError::AccessDenied {
            status: AuthorizationStatus::Denied
        }
        .is_partial());
    }

    #[test]
    fn test_platform_error_is_exposed_as_source() {
        let err = LibraryError::AlbumCreationFailed(PlatformError::new(3301, "quota exceeded"));
        assert_eq!(err.kind(), "AlbumCreationFailed");
        let source = err.source().map(|s| s.to_string()).unwrap_or_default();
        assert!(source.contains("quota exceeded"));
    }

    #[test]
    fn test_access_denied_message_names_status() {
        let err = LibraryError::AccessDenied {
            status: AuthorizationStatus::NotDetermined,
        };
        assert!(err.to_string().contains("not determined"));
    }
}
