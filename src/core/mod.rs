//! Core functionality module
//!
//! This module contains the core logic of the library saver, including
//! configuration management, error handling, the media file model and the
//! saver itself.
//!
//! # Submodules
//!
//! - `config` - Configuration loading, saving, and management
//! - `error` - Error types and result aliases
//! - `gate` - Single-use blocking gates over platform callbacks
//! - `media_file` - Files handed over for placement and save outcomes
//! - `saver` - The `LibrarySaver` entry point

pub mod config;
pub mod error;
pub mod gate;
pub mod media_file;
pub mod saver;
