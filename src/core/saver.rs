//! Library saver
//!
//! [`LibrarySaver`] places a finished download into a durable, user-visible
//! location through a [`LibraryTarget`]. Each call is independent and runs
//! to completion; nothing is retried or cancelled.
//!
//! ```rust,no_run
//! use library_saver::core::media_file::MediaFile;
//! use library_saver::core::saver::LibrarySaver;
//! use library_saver::library::DesktopFileTarget;
//!
//! let saver = LibrarySaver::new(Box::new(DesktopFileTarget::new()));
//! let placement = saver.save_to_library(MediaFile::new("/tmp/video.mp4"))?;
//! println!("Saved to {}", placement);
//! # Ok::<(), library_saver::core::error::LibraryError>(())
//! ```

use crate::core::config::Config;
use crate::core::error::{LibraryError, Result};
use crate::core::media_file::MediaFile;
use crate::library::traits::{LibraryTarget, PhotoLibrary, Placement, TargetKind};
use crate::library::{DesktopFileTarget, MobileLibraryTarget};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;

/// Places finished media files into the configured library target
pub struct LibrarySaver {
    target: Box<dyn LibraryTarget>,
}

impl LibrarySaver {
    /// Create a saver over an explicit target
    pub fn new(target: Box<dyn LibraryTarget>) -> Self {
        Self { target }
    }

    /// Build the target described by `config`.
    ///
    /// The mobile target needs the platform photo library; without one the
    /// build fails with `BackendUnavailable`.
    pub fn from_config(config: &Config, library: Option<Arc<dyn PhotoLibrary>>) -> Result<Self> {
        let target: Box<dyn LibraryTarget> = match config.target.kind {
            TargetKind::Mobile => {
                let library = library.ok_or(LibraryError::BackendUnavailable(TargetKind::Mobile))?;
                Box::new(MobileLibraryTarget::with_album_name(
                    library,
                    &config.album.name,
                ))
            }
            TargetKind::Desktop => {
                let mut target = DesktopFileTarget::new();
                if let Some(ref dir) = config.desktop.downloads_dir {
                    target = target.with_downloads_dir(dir);
                }
                if !config.desktop.reveal_in_file_browser {
                    target = target.without_reveal();
                }
                Box::new(target)
            }
        };
        debug!("Library target: {}", target.kind());
        Ok(Self::new(target))
    }

    /// Kind of the underlying target
    pub fn target_kind(&self) -> TargetKind {
        self.target.kind()
    }

    /// Place `file` into the library, blocking until the platform answers.
    ///
    /// Do not call this from a thread that must stay responsive; see
    /// [`LibrarySaver::save_to_library_async`].
    pub fn save_to_library(&self, file: MediaFile) -> Result<Placement> {
        let started = Instant::now();
        info!("Saving {} ({} target)", file, self.target.kind());
        if !file.is_video() {
            debug!("{} does not have a known video extension", file);
        }

        let result = self.target.place(&file);
        match &result {
            Ok(placement) => info!(
                "Saved {} to {} in {:.1}s",
                file,
                placement,
                started.elapsed().as_secs_f64()
            ),
            Err(e) if e.is_partial() => warn!("{}", e),
            Err(e) => error!("Failed to save {}: {}", file, e),
        }
        result
    }

    /// Run [`LibrarySaver::save_to_library`] on tokio's blocking pool.
    ///
    /// A save that the runtime drops before it starts (runtime shutdown)
    /// returns `SaveCancelled`; the file is untouched in that case.
    pub async fn save_to_library_async(self: Arc<Self>, file: MediaFile) -> Result<Placement> {
        finish_blocking_save(tokio::task::spawn_blocking(move || self.save_to_library(file)).await)
    }
}

/// Unwrap the outcome of a save that ran as a tokio task
fn finish_blocking_save(
    joined: std::result::Result<Result<Placement>, tokio::task::JoinError>,
) -> Result<Placement> {
    match joined {
        Ok(result) => result,
        Err(join_error) => match join_error.try_into_panic() {
            Ok(payload) => std::panic::resume_unwind(payload),
            Err(join_error) => {
                warn!("Save task did not run: {}", join_error);
                Err(LibraryError::SaveCancelled)
            }
        },
    }
}
