//! Downloads folder target
//!
//! Moves a finished file into the user's Downloads directory and reveals it
//! in the file browser. Name collisions are not detected: the rename replaces
//! an existing file of the same name.

use crate::core::error::{LibraryError, Result};
use crate::core::media_file::MediaFile;
use crate::library::reveal::{FileRevealer, NoopRevealer, SystemRevealer};
use crate::library::traits::{LibraryTarget, Placement, TargetKind};
use log::{debug, info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Library target moving files into the Downloads folder
pub struct DesktopFileTarget {
    /// Overrides the OS Downloads directory when set
    downloads_dir: Option<PathBuf>,
    revealer: Box<dyn FileRevealer>,
}

impl DesktopFileTarget {
    /// Target the OS Downloads directory and reveal in the system file browser
    pub fn new() -> Self {
        Self {
            downloads_dir: None,
            revealer: Box::new(SystemRevealer),
        }
    }

    /// Use a fixed directory instead of the OS Downloads directory
    pub fn with_downloads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.downloads_dir = Some(dir.into());
        self
    }

    /// Replace the revealer
    pub fn with_revealer(mut self, revealer: Box<dyn FileRevealer>) -> Self {
        self.revealer = revealer;
        self
    }

    /// Turn off the file browser reveal
    pub fn without_reveal(self) -> Self {
        self.with_revealer(Box::new(NoopRevealer))
    }

    /// The directory files are moved into
    pub fn resolve_downloads_dir(&self) -> Result<PathBuf> {
        self.downloads_dir
            .clone()
            .or_else(dirs::download_dir)
            .ok_or(LibraryError::DownloadsDirUnavailable)
    }

    /// Destination path for `file` inside `downloads`
    fn destination_for(file: &MediaFile, downloads: &Path) -> Result<PathBuf> {
        let name = file.file_name().ok_or_else(|| LibraryError::MoveFailed {
            from: file.path().to_path_buf(),
            to: downloads.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "source path has no file name"),
        })?;
        Ok(downloads.join(name))
    }
}

impl Default for DesktopFileTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryTarget for DesktopFileTarget {
    fn kind(&self) -> TargetKind {
        TargetKind::Desktop
    }

    fn place(&self, file: &MediaFile) -> Result<Placement> {
        let downloads = self.resolve_downloads_dir()?;
        let destination = Self::destination_for(file, &downloads)?;

        if destination.exists() {
            debug!(
                "Destination {} already exists and will be replaced",
                destination.display()
            );
        }

        fs::rename(file.path(), &destination).map_err(|source| LibraryError::MoveFailed {
            from: file.path().to_path_buf(),
            to: destination.clone(),
            source,
        })?;
        info!("Moved {} to {}", file, destination.display());

        if let Err(e) = self.revealer.reveal(&destination, &downloads) {
            warn!("Failed to reveal {}: {}", destination.display(), e);
        }

        Ok(Placement::Downloads { destination })
    }
}
