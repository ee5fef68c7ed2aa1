//! Media library abstraction traits
//!
//! This module defines the seams between the saver and the platform:
//!
//! - `LibraryTarget` - where a finished file ends up (Photos album or Downloads folder)
//! - `PhotoLibrary` - the platform photo library, exposed the way the OS exposes it:
//!   authorization and change requests complete through callbacks
//!
//! The real photo library binding lives in the embedding application; the
//! `testdb` module ships an in-memory implementation used by tests and the
//! `simulate` command.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use library_saver::library::traits::{AuthorizationStatus, PhotoLibrary};
//!
//! fn log_status<L: PhotoLibrary>(library: &L) {
//!     library.request_authorization(Box::new(|status: AuthorizationStatus| {
//!         println!("Photo library access: {}", status);
//!     }));
//! }
//! ```

use crate::core::error::Result;
use crate::core::media_file::MediaFile;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which kind of library a target writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Photos library album (iOS, Android)
    Mobile,
    /// Downloads folder plus file browser reveal (macOS, Windows, Linux)
    Desktop,
}

impl TargetKind {
    /// The target family of the platform this binary was built for
    pub fn native() -> Self {
        if cfg!(any(target_os = "ios", target_os = "android")) {
            TargetKind::Mobile
        } else {
            TargetKind::Desktop
        }
    }

    /// Get a human-readable name for this target
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetKind::Mobile => "mobile",
            TargetKind::Desktop => "desktop",
        }
    }
}

impl Default for TargetKind {
    fn default() -> Self {
        Self::native()
    }
}

impl Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Photo library authorization state as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    NotDetermined,
    /// Access is restricted by policy (parental controls, MDM)
    Restricted,
    /// The user declined access
    Denied,
    /// Full access
    Authorized,
    /// Access limited to a user-selected subset
    Limited,
}

impl AuthorizationStatus {
    /// Whether album and asset operations may proceed.
    ///
    /// Only an explicit denial or an unanswered prompt blocks the save;
    /// `Restricted` is handed through and left to the platform.
    pub fn permits_changes(&self) -> bool {
        !matches!(
            self,
            AuthorizationStatus::Denied | AuthorizationStatus::NotDetermined
        )
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AuthorizationStatus::NotDetermined => "not determined",
            AuthorizationStatus::Restricted => "restricted",
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::Authorized => "authorized",
            AuthorizationStatus::Limited => "limited",
        }
    }
}

impl Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Error reported by a platform completion callback
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (code {code})")]
pub struct PlatformError {
    /// Platform error code
    pub code: i64,
    /// Platform-provided description
    pub message: String,
}

impl PlatformError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Reference to a named collection in the photo library
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlbumHandle {
    /// Platform identifier of the collection
    pub local_identifier: String,
    /// Display title the album was looked up by
    pub title: String,
}

impl AlbumHandle {
    pub fn new(local_identifier: &str, title: &str) -> Self {
        Self {
            local_identifier: local_identifier.to_string(),
            title: title.to_string(),
        }
    }
}

/// Where a saved file ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Imported as an asset into a photo library album
    LibraryAsset { album: AlbumHandle },
    /// Moved into the downloads folder
    Downloads { destination: PathBuf },
}

impl Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::LibraryAsset { album } => write!(f, "Photos album '{}'", album.title),
            Placement::Downloads { destination } => write!(f, "{}", destination.display()),
        }
    }
}

/// One-shot completion callback handed to the platform
pub type Completion<T> = Box<dyn FnOnce(T) + Send + 'static>;

/// Platform photo library, mirroring the shape of the OS API.
///
/// Authorization and change requests are asynchronous: the implementation
/// invokes the completion exactly once, on any thread. Album fetches are
/// synchronous queries.
pub trait PhotoLibrary: Send + Sync {
    /// Ask for read/write access, prompting the user if needed
    fn request_authorization(&self, completion: Completion<AuthorizationStatus>);

    /// Find the first album whose title matches exactly
    fn fetch_album(&self, title: &str) -> Option<AlbumHandle>;

    /// Submit a change request creating an album with the given title
    fn create_album(
        &self,
        title: &str,
        completion: Completion<std::result::Result<(), PlatformError>>,
    );

    /// Submit one change request that creates a video asset from `file` and
    /// adds its placeholder to `album`, committed atomically
    fn create_video_asset(
        &self,
        file: &Path,
        album: &AlbumHandle,
        completion: Completion<std::result::Result<(), PlatformError>>,
    );
}

/// A durable, user-visible destination for finished media files
pub trait LibraryTarget: Send + Sync {
    /// Which kind of target this is
    fn kind(&self) -> TargetKind;

    /// Place `file` into the library.
    ///
    /// On success the source path no longer holds the file.
    fn place(&self, file: &MediaFile) -> Result<Placement>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_and_not_determined_block_changes() {
        assert!(!AuthorizationStatus::Denied.permits_changes());
        assert!(!AuthorizationStatus::NotDetermined.permits_changes());
        assert!(AuthorizationStatus::Authorized.permits_changes());
        assert!(AuthorizationStatus::Limited.permits_changes());
        assert!(AuthorizationStatus::Restricted.permits_changes());
    }

    #[test]
    fn test_native_target_kind() {
        #[cfg(not(any(target_os = "ios", target_os = "android")))]
        assert_eq!(TargetKind::native(), TargetKind::Desktop);
        #[cfg(any(target_os = "ios", target_os = "android"))]
        assert_eq!(TargetKind::native(), TargetKind::Mobile);
    }

    #[test]
    fn test_target_kind_serde_names() {
        let kind: TargetKind = serde_json::from_str("\"mobile\"").unwrap();
        assert_eq!(kind, TargetKind::Mobile);
        assert_eq!(serde_json::to_string(&TargetKind::Desktop).unwrap(), "\"desktop\"");
    }

    #[test]
    fn test_placement_display() {
        let placement = Placement::LibraryAsset {
            album: AlbumHandle::new("album-1", "SwiftyYTDL"),
        };
        assert_eq!(placement.to_string(), "Photos album 'SwiftyYTDL'");
    }
}
