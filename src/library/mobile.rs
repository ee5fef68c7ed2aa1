//! Photos library target
//!
//! Saves a video into a named album of the platform photo library:
//!
//! 1. Request authorization (blocking on the callback)
//! 2. Find the album by exact title, creating it on first use
//! 3. Create the video asset and add it to the album in one change request
//! 4. Delete the temporary source file

use crate::core::config::DEFAULT_ALBUM_NAME;
use crate::core::error::{LibraryError, Result};
use crate::core::gate::{block_on_completion, GateError};
use crate::core::media_file::MediaFile;
use crate::library::traits::{
    AlbumHandle, AuthorizationStatus, LibraryTarget, PhotoLibrary, Placement, PlatformError,
    TargetKind,
};
use log::{debug, info, warn};
use std::fs;
use std::sync::Arc;

/// Error code used when a change request callback is discarded unanswered
pub const DROPPED_CALLBACK_CODE: i64 = -1;

/// Library target writing into a Photos album
pub struct MobileLibraryTarget {
    library: Arc<dyn PhotoLibrary>,
    album_name: String,
}

impl MobileLibraryTarget {
    /// Create a target for the default album
    pub fn new(library: Arc<dyn PhotoLibrary>) -> Self {
        Self::with_album_name(library, DEFAULT_ALBUM_NAME)
    }

    /// Create a target for a specific album title
    pub fn with_album_name(library: Arc<dyn PhotoLibrary>, album_name: &str) -> Self {
        Self {
            library,
            album_name: album_name.to_string(),
        }
    }

    pub fn album_name(&self) -> &str {
        &self.album_name
    }

    /// Ask for library access and block until the user (or cache) answers
    fn request_authorization(&self) -> AuthorizationStatus {
        let status = block_on_completion(|done| self.library.request_authorization(done))
            .unwrap_or_else(|_| {
                warn!("Authorization callback was dropped; treating status as not determined");
                AuthorizationStatus::NotDetermined
            });
        debug!("Photo library authorization status: {}", status);
        status
    }

    /// Resolve the target album, creating it if it does not exist yet
    fn fetch_or_create_album(&self) -> Result<AlbumHandle> {
        let status = self.request_authorization();
        if !status.permits_changes() {
            return Err(LibraryError::AccessDenied { status });
        }

        if let Some(album) = self.library.fetch_album(&self.album_name) {
            debug!(
                "Using existing album '{}' ({})",
                album.title, album.local_identifier
            );
            return Ok(album);
        }

        info!("Creating album '{}'", self.album_name);
        let created = block_on_completion(|done| self.library.create_album(&self.album_name, done))
            .unwrap_or_else(|e| Err(dropped_callback("album creation", e)));
        created.map_err(LibraryError::AlbumCreationFailed)?;

        // Creation and lookup are separate calls with no transaction between them.
        self.library
            .fetch_album(&self.album_name)
            .ok_or_else(|| LibraryError::AlbumLookupFailed {
                album: self.album_name.clone(),
            })
    }
}

fn dropped_callback(step: &str, err: GateError) -> PlatformError {
    PlatformError::new(DROPPED_CALLBACK_CODE, format!("{} {}", step, err))
}

impl LibraryTarget for MobileLibraryTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::Mobile
    }

    fn place(&self, file: &MediaFile) -> Result<Placement> {
        let album = self.fetch_or_create_album()?;

        info!("Importing {} into album '{}'", file, album.title);
        let imported = block_on_completion(|done| {
            self.library.create_video_asset(file.path(), &album, done)
        })
        .unwrap_or_else(|e| Err(dropped_callback("asset creation", e)));
        imported.map_err(LibraryError::AssetCreationFailed)?;

        fs::remove_file(file.path()).map_err(|source| LibraryError::CleanupFailed {
            path: file.path().to_path_buf(),
            source,
        })?;
        debug!("Removed temporary file {}", file);

        Ok(Placement::LibraryAsset { album })
    }
}
