//! Media library targets
//!
//! This module provides the destinations a finished file can be saved into.
//!
//! # Submodules
//!
//! - `traits` - `LibraryTarget` and the callback-based `PhotoLibrary` seam
//! - `mobile` - Photos album target (authorize, find-or-create album, import)
//! - `desktop` - Downloads folder target (move, reveal)
//! - `reveal` - File browser reveal helpers
//!
//! # Architecture
//!
//! The saver only talks to `LibraryTarget`. Which implementation is used is
//! decided from configuration, defaulting to the platform family the binary
//! was built for. The mobile target drives any `PhotoLibrary`, so the same
//! code runs against the platform binding and the in-memory mock.

pub mod desktop;
pub mod mobile;
pub mod reveal;
pub mod traits;

pub use desktop::DesktopFileTarget;
pub use mobile::MobileLibraryTarget;
pub use reveal::{FileRevealer, NoopRevealer, SystemRevealer};
pub use traits::{
    AlbumHandle, AuthorizationStatus, Completion, LibraryTarget, PhotoLibrary, Placement,
    PlatformError, TargetKind,
};
