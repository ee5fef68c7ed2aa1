//! Mock photo library for testing without a device
//!
//! [`MockPhotoLibrary`] implements the callback-based `PhotoLibrary` seam
//! with an in-memory album/asset store. Like the platform, it answers
//! authorization and change requests on a background thread, optionally after
//! a delay, and can be configured to fail at any step of a save.

use crate::library::traits::{
    AlbumHandle, AuthorizationStatus, Completion, PhotoLibrary, PlatformError,
};
use chrono::{DateTime, Utc};
use log::trace;
use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread;
use std::time::Duration;

/// Platform error code for a source file the library cannot read
pub const ERROR_INVALID_RESOURCE: i64 = 3302;

/// Platform error code for a change request against an unknown album
pub const ERROR_UNKNOWN_ALBUM: i64 = 3303;

/// Configuration for mock library behavior
#[derive(Debug, Clone)]
pub struct MockLibraryConfig {
    /// Status reported to authorization requests
    pub authorization: AuthorizationStatus,
    /// Album titles present before the first save
    pub existing_albums: Vec<String>,
    /// Fail album creation with this error
    pub album_creation_error: Option<PlatformError>,
    /// Report album creation as successful but keep the album out of fetches
    pub hide_created_albums: bool,
    /// Fail asset creation with this error
    pub asset_creation_error: Option<PlatformError>,
    /// Delete the source file while importing it (makes cleanup fail)
    pub consume_source_on_import: bool,
    /// Drop authorization callbacks without calling them
    pub drop_authorization_callback: bool,
    /// Drop change request callbacks without calling them
    pub drop_change_callbacks: bool,
    /// Delay before each callback fires
    pub callback_latency: Duration,
}

impl Default for MockLibraryConfig {
    fn default() -> Self {
        Self {
            authorization: AuthorizationStatus::Authorized,
            existing_albums: Vec::new(),
            album_creation_error: None,
            hide_created_albums: false,
            asset_creation_error: None,
            consume_source_on_import: false,
            drop_authorization_callback: false,
            drop_change_callbacks: false,
            callback_latency: Duration::ZERO,
        }
    }
}

/// An album stored in the mock library
#[derive(Debug, Clone)]
pub struct MockAlbum {
    pub handle: AlbumHandle,
    /// Hidden albums exist but are not returned by fetches
    pub hidden: bool,
}

/// A video asset stored in the mock library
#[derive(Debug, Clone)]
pub struct MockAsset {
    /// Unique asset identifier
    pub local_identifier: String,
    /// Album the asset was added to
    pub album_identifier: String,
    /// Base name of the imported file
    pub file_name: String,
    /// Size of the imported file in bytes
    pub size: u64,
    /// Import time
    pub created_at: DateTime<Utc>,
}

/// Library contents and request counters
#[derive(Debug, Default)]
struct MockLibraryState {
    albums: Vec<MockAlbum>,
    assets: Vec<MockAsset>,
    next_id: u64,
    authorization_requests: usize,
    album_creation_requests: usize,
    asset_creation_requests: usize,
}

impl MockLibraryState {
    fn next_identifier(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{:04}/L0/001", prefix, self.next_id)
    }

    fn add_album(&mut self, title: &str, hidden: bool) -> AlbumHandle {
        let handle = AlbumHandle::new(&self.next_identifier("album"), title);
        self.albums.push(MockAlbum {
            handle: handle.clone(),
            hidden,
        });
        handle
    }
}

/// In-memory photo library with simulated asynchronous callbacks
pub struct MockPhotoLibrary {
    state: Arc<RwLock<MockLibraryState>>,
    config: MockLibraryConfig,
}

impl MockPhotoLibrary {
    /// Create an authorized, empty library
    pub fn new() -> Self {
        Self::with_config(MockLibraryConfig::default())
    }

    /// Create with specific configuration
    pub fn with_config(config: MockLibraryConfig) -> Self {
        let mut state = MockLibraryState::default();
        for title in &config.existing_albums {
            state.add_album(title, false);
        }
        Self {
            state: Arc::new(RwLock::new(state)),
            config,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, MockLibraryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// All albums, including hidden ones
    pub fn albums(&self) -> Vec<MockAlbum> {
        self.read().albums.clone()
    }

    /// All assets across albums
    pub fn assets(&self) -> Vec<MockAsset> {
        self.read().assets.clone()
    }

    /// Assets added to `album`
    pub fn assets_in(&self, album: &AlbumHandle) -> Vec<MockAsset> {
        self.read()
            .assets
            .iter()
            .filter(|a| a.album_identifier == album.local_identifier)
            .cloned()
            .collect()
    }

    pub fn asset_count(&self) -> usize {
        self.read().assets.len()
    }

    pub fn authorization_requests(&self) -> usize {
        self.read().authorization_requests
    }

    pub fn album_creation_requests(&self) -> usize {
        self.read().album_creation_requests
    }

    pub fn asset_creation_requests(&self) -> usize {
        self.read().asset_creation_requests
    }

    /// Run `work` on a background thread after the configured latency and
    /// hand its result to `completion`
    fn complete_later<T, F>(&self, completion: Completion<T>, work: F)
    where
        T: Send + 'static,
        F: FnOnce(&mut MockLibraryState) -> T + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        let latency = self.config.callback_latency;
        thread::spawn(move || {
            if !latency.is_zero() {
                thread::sleep(latency);
            }
            let value = work(&mut write_state(&state));
            completion(value);
        });
    }
}

fn write_state(state: &RwLock<MockLibraryState>) -> RwLockWriteGuard<'_, MockLibraryState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// Apply an asset creation request to the library state
fn import_asset(
    state: &mut MockLibraryState,
    file: &Path,
    album: &AlbumHandle,
    error: Option<PlatformError>,
    consume_source: bool,
) -> Result<(), PlatformError> {
    if let Some(err) = error {
        return Err(err);
    }
    if !state
        .albums
        .iter()
        .any(|a| a.handle.local_identifier == album.local_identifier)
    {
        return Err(PlatformError::new(
            ERROR_UNKNOWN_ALBUM,
            format!("album '{}' does not exist", album.title),
        ));
    }
    let size = fs::metadata(file)
        .map_err(|e| {
            PlatformError::new(
                ERROR_INVALID_RESOURCE,
                format!("cannot read {}: {}", file.display(), e),
            )
        })?
        .len();

    let asset = MockAsset {
        local_identifier: state.next_identifier("asset"),
        album_identifier: album.local_identifier.clone(),
        file_name: file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        size,
        created_at: Utc::now(),
    };
    trace!("Imported {:?}", asset);
    state.assets.push(asset);

    if consume_source {
        let _ = fs::remove_file(file);
    }
    Ok(())
}

impl Default for MockPhotoLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoLibrary for MockPhotoLibrary {
    fn request_authorization(&self, completion: Completion<AuthorizationStatus>) {
        if self.config.drop_authorization_callback {
            write_state(&self.state).authorization_requests += 1;
            trace!("Dropping authorization callback");
            return;
        }

        let status = self.config.authorization;
        self.complete_later(completion, move |state| {
            state.authorization_requests += 1;
            status
        });
    }

    fn fetch_album(&self, title: &str) -> Option<AlbumHandle> {
        self.read()
            .albums
            .iter()
            .find(|album| !album.hidden && album.handle.title == title)
            .map(|album| album.handle.clone())
    }

    fn create_album(&self, title: &str, completion: Completion<Result<(), PlatformError>>) {
        write_state(&self.state).album_creation_requests += 1;
        if self.config.drop_change_callbacks {
            trace!("Dropping album creation callback for '{}'", title);
            return;
        }

        let title = title.to_string();
        let error = self.config.album_creation_error.clone();
        let hidden = self.config.hide_created_albums;
        self.complete_later(completion, move |state| match error {
            Some(err) => Err(err),
            None => {
                let handle = state.add_album(&title, hidden);
                trace!("Created album {:?}", handle);
                Ok(())
            }
        });
    }

    fn create_video_asset(
        &self,
        file: &Path,
        album: &AlbumHandle,
        completion: Completion<Result<(), PlatformError>>,
    ) {
        write_state(&self.state).asset_creation_requests += 1;
        if self.config.drop_change_callbacks {
            trace!("Dropping asset creation callback for {}", file.display());
            return;
        }

        let file = file.to_path_buf();
        let album = album.clone();
        let error = self.config.asset_creation_error.clone();
        let consume_source = self.config.consume_source_on_import;
        self.complete_later(completion, move |state| {
            import_asset(state, &file, &album, error, consume_source)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gate::block_on_completion;
    use tempfile::TempDir;

    #[test]
    fn test_existing_albums_are_fetchable() {
        let library = MockPhotoLibrary::with_config(MockLibraryConfig {
            existing_albums: vec!["Camera Roll".to_string(), "SwiftyYTDL".to_string()],
            ..Default::default()
        });
        assert_eq!(library.fetch_album("SwiftyYTDL").unwrap().title, "SwiftyYTDL");
        assert!(library.fetch_album("swiftyytdl").is_none());
    }

    #[test]
    fn test_fetch_returns_first_match_for_duplicates() {
        let library = MockPhotoLibrary::with_config(MockLibraryConfig {
            existing_albums: vec!["Videos".to_string(), "Videos".to_string()],
            ..Default::default()
        });
        let albums = library.albums();
        assert_eq!(
            library.fetch_album("Videos").unwrap(),
            albums[0].handle.clone()
        );
    }

    #[test]
    fn test_authorization_answers_from_background_thread() {
        let library = MockPhotoLibrary::with_config(MockLibraryConfig {
            authorization: AuthorizationStatus::Limited,
            callback_latency: Duration::from_millis(5),
            ..Default::default()
        });
        let status = block_on_completion(|done| library.request_authorization(done)).unwrap();
        assert_eq!(status, AuthorizationStatus::Limited);
        assert_eq!(library.authorization_requests(), 1);
    }

    #[test]
    fn test_dropped_authorization_callback() {
        let library = MockPhotoLibrary::with_config(MockLibraryConfig {
            drop_authorization_callback: true,
            ..Default::default()
        });
        let status = block_on_completion(|done| library.request_authorization(done));
        assert!(status.is_err());
        assert_eq!(library.authorization_requests(), 1);
    }

    #[test]
    fn test_hidden_album_is_created_but_not_fetched() {
        let library = MockPhotoLibrary::with_config(MockLibraryConfig {
            hide_created_albums: true,
            ..Default::default()
        });
        block_on_completion(|done| library.create_album("SwiftyYTDL", done))
            .unwrap()
            .unwrap();
        assert_eq!(library.albums().len(), 1);
        assert!(library.fetch_album("SwiftyYTDL").is_none());
    }

    #[test]
    fn test_asset_for_missing_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let library = MockPhotoLibrary::with_config(MockLibraryConfig {
            existing_albums: vec!["SwiftyYTDL".to_string()],
            ..Default::default()
        });
        let album = library.fetch_album("SwiftyYTDL").unwrap();

        let result = block_on_completion(|done| {
            library.create_video_asset(&dir.path().join("missing.mp4"), &album, done)
        })
        .unwrap();

        assert_eq!(result.unwrap_err().code, ERROR_INVALID_RESOURCE);
        assert_eq!(library.asset_count(), 0);
    }

    #[test]
    fn test_asset_for_unknown_album_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.mp4");
        fs::write(&path, b"data").unwrap();
        let library = MockPhotoLibrary::new();
        let album = AlbumHandle::new("album-9999/L0/001", "Elsewhere");

        let result =
            block_on_completion(|done| library.create_video_asset(&path, &album, done)).unwrap();

        assert_eq!(result.unwrap_err().code, ERROR_UNKNOWN_ALBUM);
    }

    #[test]
    fn test_asset_records_file_details() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.mp4");
        fs::write(&path, vec![7u8; 2048]).unwrap();
        let library = MockPhotoLibrary::with_config(MockLibraryConfig {
            existing_albums: vec!["SwiftyYTDL".to_string()],
            ..Default::default()
        });
        let album = library.fetch_album("SwiftyYTDL").unwrap();

        block_on_completion(|done| library.create_video_asset(&path, &album, done))
            .unwrap()
            .unwrap();

        let assets = library.assets_in(&album);
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].file_name, "clip.mp4");
        assert_eq!(assets[0].size, 2048);
        assert_eq!(library.assets()[0].local_identifier, assets[0].local_identifier);
        assert_eq!(library.asset_creation_requests(), 1);
        // The library copies the file; removing the source is the caller's job.
        assert!(path.exists());
    }
}
