//! Library Saver
//!
//! Places a finished video download into the user's media library. On mobile
//! platforms the video is imported into a dedicated Photos album and the
//! temporary file is deleted. On desktop platforms the file is moved into
//! the Downloads folder and revealed in the file browser.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`core`] - Configuration, error handling, the completion gate and the
//!   [`core::saver::LibrarySaver`] entry point
//! - [`library`] - The two library targets and the platform photo library
//!   interface they sit on
//! - [`cli`] - Command-line interface (only used by the binary)
//! - [`testdb`] - Mock photo library, save scenarios and a scenario runner
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use library_saver::core::config::Config;
//! use library_saver::core::media_file::MediaFile;
//! use library_saver::core::saver::LibrarySaver;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default()?;
//!
//!     // Desktop builds need no platform library; mobile apps pass theirs in.
//!     let saver = LibrarySaver::from_config(&config, None)?;
//!     let placement = saver.save_to_library(MediaFile::new("/tmp/download.mp4"))?;
//!     println!("Saved to {}", placement);
//!     Ok(())
//! }
//! ```
//!
//! # Async callers
//!
//! Saving blocks until the platform answers. UI code running on tokio should
//! use [`core::saver::LibrarySaver::save_to_library_async`], which moves the
//! wait onto the blocking pool.

pub mod cli;
pub mod core;
pub mod library;
pub mod testdb;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
