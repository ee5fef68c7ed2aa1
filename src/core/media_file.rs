//! Media files handed over for placement
//!
//! A [`MediaFile`] is a finished download sitting at a temporary path.
//! Ownership moves into the saver; once a save returns the original path
//! must be treated as gone.

use crate::core::error::LibraryError;
use crate::library::traits::Placement;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Video extensions the photo library accepts as video assets
const VIDEO_EXTENSIONS: &[&str] = &["mov", "mp4", "m4v", "avi", "3gp", "webm", "mkv"];

/// A finished file waiting to be placed into the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    path: PathBuf,
}

impl MediaFile {
    /// Wrap a path to a fully written, closed file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Current location of the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the file, if the path has one
    pub fn file_name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }

    /// Lowercased extension
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// Whether the extension is a known video container
    pub fn is_video(&self) -> bool {
        self.extension()
            .map(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// Content type hint (e.g., "video/mp4")
    pub fn content_type(&self) -> Option<&'static str> {
        match self.extension()?.as_str() {
            "mov" => Some("video/quicktime"),
            "mp4" | "m4v" => Some("video/mp4"),
            "webm" => Some("video/webm"),
            "mkv" => Some("video/x-matroska"),
            "avi" => Some("video/x-msvideo"),
            "3gp" => Some("video/3gpp"),
            _ => None,
        }
    }
}

impl fmt::Display for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl From<PathBuf> for MediaFile {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for MediaFile {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

/// Outcome of one save attempt
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveState {
    /// Not attempted yet
    #[default]
    Pending,
    /// The file reached the library
    Saved(Placement),
    /// The attempt failed
    Failed {
        /// Error variant name
        kind: String,
        /// Display form of the error
        reason: String,
        /// The media is durable even though the attempt failed
        partial: bool,
    },
}

impl SaveState {
    /// Fold the result of a save into its terminal state
    pub fn from_result(result: &std::result::Result<Placement, LibraryError>) -> Self {
        match result {
            Ok(placement) => SaveState::Saved(placement.clone()),
            Err(err) => SaveState::Failed {
                kind: err.kind().to_string(),
                reason: err.to_string(),
                partial: err.is_partial(),
            },
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SaveState::Saved(_))
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SaveState::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_detection_is_case_insensitive() {
        assert!(MediaFile::new("/tmp/Clip.MP4").is_video());
        assert!(MediaFile::new("/tmp/clip.mov").is_video());
        assert!(!MediaFile::new("/tmp/notes.txt").is_video());
        assert!(!MediaFile::new("/tmp/no_extension").is_video());
    }

    #[test]
    fn test_content_type() {
        assert_eq!(MediaFile::new("a.mov").content_type(), Some("video/quicktime"));
        assert_eq!(MediaFile::new("a.m4v").content_type(), Some("video/mp4"));
        assert_eq!(MediaFile::new("a.jpg").content_type(), None);
    }

    #[test]
    fn test_file_name() {
        let file = MediaFile::new("/var/tmp/downloads/video.mp4");
        assert_eq!(file.file_name(), Some(OsStr::new("video.mp4")));
        assert_eq!(MediaFile::new("/").file_name(), None);
    }

    #[test]
    fn test_save_state_transitions() {
        assert!(!SaveState::default().is_terminal());

        let saved = SaveState::from_result(&Ok(Placement::Downloads {
            destination: PathBuf::from("/home/user/Downloads/video.mp4"),
        }));
        assert!(saved.is_saved());
        assert!(saved.is_terminal());

        let failed = SaveState::from_result(&Err(LibraryError::DownloadsDirUnavailable));
        match failed {
            SaveState::Failed { kind, partial, .. } => {
                assert_eq!(kind, "DownloadsDirUnavailable");
                assert!(!partial);
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }
}
