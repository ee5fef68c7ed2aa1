//! Command-line argument definitions
//!
//! This module defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Save downloaded videos into the Photos library or the Downloads folder
#[derive(Parser, Debug)]
#[command(name = "save-to-library")]
#[command(version)]
#[command(about = "Save downloaded videos into the Photos library or Downloads", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides config)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a finished video into the library
    ///
    /// On the desktop target the file is moved into the Downloads folder and
    /// shown in the file browser. On the mobile target it is imported into
    /// the Photos album and the temporary file is deleted.
    Save {
        /// The video file to save
        file: PathBuf,

        /// Library target (overrides config)
        #[arg(long, value_name = "TARGET", value_parser = ["mobile", "desktop"])]
        target: Option<String>,

        /// Album title for the mobile target (overrides config)
        #[arg(long)]
        album: Option<String>,

        /// Move files here instead of the OS Downloads folder (overrides config)
        #[arg(long, value_name = "DIR")]
        downloads_dir: Option<PathBuf>,

        /// Do not reveal the saved file in the file browser
        #[arg(long)]
        no_reveal: bool,
    },

    /// Open the configuration file in your default editor
    ///
    /// If no config file exists, a default one will be created.
    Config {
        /// Show the config file path without opening it
        #[arg(long)]
        path: bool,

        /// Reset config to defaults (creates a fresh config file)
        #[arg(long)]
        reset: bool,
    },

    /// Generate a configuration file at a specific location
    GenerateConfig {
        /// Output path for the config file (defaults to standard location)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration
    ShowConfig,

    /// Run save scenarios against the mock photo library
    ///
    /// Every scenario runs in a scratch directory under the system temp dir.
    Simulate {
        /// Scenario names to run (comma-separated or multiple values; default: all)
        #[arg(short, long, value_delimiter = ',')]
        scenario: Vec<String>,

        /// Only run scenarios with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,

        /// Keep scratch directories for inspection
        #[arg(long)]
        keep_scratch: bool,
    },

    /// List all available scenarios
    ListScenarios,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_save() {
        let args = Args::parse_from([
            "save-to-library",
            "save",
            "/tmp/video.mp4",
            "--target",
            "desktop",
            "--no-reveal",
        ]);
        match args.command {
            Commands::Save {
                file,
                target,
                no_reveal,
                album,
                downloads_dir,
            } => {
                assert_eq!(file, PathBuf::from("/tmp/video.mp4"));
                assert_eq!(target.as_deref(), Some("desktop"));
                assert!(no_reveal);
                assert!(album.is_none());
                assert!(downloads_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_target_is_rejected() {
        let result =
            Args::try_parse_from(["save-to-library", "save", "video.mp4", "--target", "tv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_simulate_list() {
        let args = Args::parse_from([
            "save-to-library",
            "--log-level",
            "debug",
            "simulate",
            "--scenario",
            "desktop_move,mobile_first_save",
            "--json",
        ]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        match args.command {
            Commands::Simulate { scenario, json, .. } => {
                assert_eq!(scenario, vec!["desktop_move", "mobile_first_save"]);
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
