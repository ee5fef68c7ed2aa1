//! Command handler implementations
//!
//! This module contains the implementation of all CLI commands.

use crate::cli::progress::{print_error, print_info, print_success, print_warning, SaveSpinner};
use crate::cli::{Args, Commands};
use crate::core::config::{get_config_path, init_config, Config};
use crate::core::media_file::MediaFile;
use crate::core::saver::LibrarySaver;
use crate::library::traits::TargetKind;
use crate::testdb::{self, RunSummary, ScenarioLibrary, ScenarioRunner, TestScenario};
use anyhow::{bail, Context, Result};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// Run the appropriate command based on CLI arguments
pub fn run_command(args: &Args, config: &Config) -> Result<()> {
    match &args.command {
        Commands::Save {
            file,
            target,
            album,
            downloads_dir,
            no_reveal,
        } => {
            let config = apply_save_overrides(
                config,
                target.as_deref(),
                album.as_deref(),
                downloads_dir.as_deref(),
                *no_reveal,
            )?;
            save_file(file, &config)
        }
        Commands::Config { path, reset } => handle_config_command(*path, *reset),
        Commands::GenerateConfig { output } => generate_config_file(output.clone()),
        Commands::ShowConfig => {
            show_config(config);
            Ok(())
        }
        Commands::Simulate {
            scenario,
            tag,
            json,
            keep_scratch,
        } => run_simulation(scenario, tag.as_deref(), *json, *keep_scratch),
        Commands::ListScenarios => {
            testdb::print_available_scenarios();
            Ok(())
        }
    }
}

/// Parse a `--target` value
fn parse_target(value: &str) -> Result<TargetKind> {
    match value.to_lowercase().as_str() {
        "mobile" => Ok(TargetKind::Mobile),
        "desktop" => Ok(TargetKind::Desktop),
        other => bail!("Unknown target '{}': expected 'mobile' or 'desktop'", other),
    }
}

/// Layer the save command's flags over the loaded configuration
fn apply_save_overrides(
    config: &Config,
    target: Option<&str>,
    album: Option<&str>,
    downloads_dir: Option<&Path>,
    no_reveal: bool,
) -> Result<Config> {
    let mut config = config.clone();
    if let Some(target) = target {
        config.target.kind = parse_target(target)?;
    }
    if let Some(album) = album {
        config.album.name = album.to_string();
    }
    if let Some(dir) = downloads_dir {
        config.desktop.downloads_dir = Some(dir.to_path_buf());
    }
    if no_reveal {
        config.desktop.reveal_in_file_browser = false;
    }
    Ok(config)
}

/// Save one file with the configured target
fn save_file(file: &Path, config: &Config) -> Result<()> {
    if !file.is_file() {
        bail!("File not found: {}", file.display());
    }

    // No platform photo library is linked into the command-line build; the
    // mobile target only works when an app supplies one.
    let saver = LibrarySaver::from_config(config, None)
        .with_context(|| format!("Cannot save with the {} target", config.target.kind))?;

    let media = MediaFile::new(file);
    let spinner = SaveSpinner::start(&format!("Saving {}", media));
    let result = saver.save_to_library(media);
    spinner.finish();

    match result {
        Ok(placement) => {
            print_success(&format!("Saved to {}", placement));
            Ok(())
        }
        Err(e) if e.is_partial() => {
            print_warning(&e.to_string());
            Ok(())
        }
        Err(e) => {
            print_error(&e.to_string());
            Err(e).context(format!("Failed to save {}", file.display()))
        }
    }
}

/// Handle the config command - open, show path, or reset config
pub fn handle_config_command(show_path: bool, reset: bool) -> Result<()> {
    if reset {
        // Delete existing config and create a fresh one
        if let Some(config_path) = get_config_path() {
            if config_path.exists() {
                std::fs::remove_file(&config_path)?;
                info!("Removed existing config file");
            }
        }
        let path = init_config()?;
        info!("Created fresh config file at: {}", path.display());
        return Ok(());
    }

    if show_path {
        let path = Config::get_active_config_path();
        println!("{}", path.display());
        if path.exists() {
            info!("Config file exists at: {}", path.display());
        } else {
            info!("Config file would be created at: {}", path.display());
        }
        return Ok(());
    }

    info!("Opening configuration file in default editor...");
    match open_config_in_editor() {
        Ok(path) => {
            info!("Config file: {}", path.display());
            info!("Save the file after editing to apply changes.");
            info!("Run 'save-to-library show-config' to verify your settings.");
        }
        Err(e) => {
            error!("Failed to open config file: {}", e);
            if let Some(path) = get_config_path() {
                info!("You can manually edit the config at: {}", path.display());
            }
        }
    }

    Ok(())
}

/// Create the config file if needed and hand it to the system editor
fn open_config_in_editor() -> Result<PathBuf> {
    let path = init_config()?;
    open::that(&path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(path)
}

/// Generate a configuration file at the specified or default location
pub fn generate_config_file(output: Option<PathBuf>) -> Result<()> {
    let output_path = match output {
        Some(path) => {
            std::fs::write(&path, Config::generate_default_config())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path
        }
        None => init_config()?,
    };

    info!("Configuration file: {}", output_path.display());
    info!("Edit this file to customize the save settings.");
    info!("");
    info!("Quick tip: Run 'save-to-library config' to open the config in your editor.");

    Ok(())
}

/// Show the current configuration settings
pub fn show_config(config: &Config) {
    let config_path = Config::get_active_config_path();
    info!("Configuration file: {}", config_path.display());
    if !config_path.exists() {
        info!("(Using default settings - no config file found)");
    }
    info!("");
    info!("Current Configuration:");
    info!("----------------------");
    info!("[target]");
    info!("  kind = \"{}\"", config.target.kind);
    info!("");
    info!("[album]");
    info!("  name = \"{}\"", config.album.name);
    info!("");
    info!("[desktop]");
    match config.desktop.downloads_dir {
        Some(ref dir) => info!("  downloads_dir = \"{}\"", dir.display()),
        None => info!("  downloads_dir = (system Downloads folder)"),
    }
    info!(
        "  reveal_in_file_browser = {}",
        config.desktop.reveal_in_file_browser
    );
    info!("");
    info!("[logging]");
    info!("  level = \"{}\"", config.logging.level);
    info!("  log_to_file = {}", config.logging.log_to_file);
    info!("  log_file = \"{}\"", config.logging.log_file.display());
}

/// Pick the scenarios named on the command line, filtered by tag
fn select_scenarios(names: &[String], tag: Option<&str>) -> Result<Vec<TestScenario>> {
    let mut scenarios = if names.is_empty() {
        ScenarioLibrary::all_scenarios()
    } else {
        names
            .iter()
            .map(|name| {
                ScenarioLibrary::get_by_name(name).with_context(|| {
                    format!(
                        "Unknown scenario '{}'. Run 'save-to-library list-scenarios'",
                        name
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?
    };

    if let Some(tag) = tag {
        scenarios.retain(|s| s.has_tag(tag));
    }
    Ok(scenarios)
}

/// Run scenarios against the mock photo library and scratch Downloads folders
fn run_simulation(
    names: &[String],
    tag: Option<&str>,
    json: bool,
    keep_scratch: bool,
) -> Result<()> {
    let scenarios = select_scenarios(names, tag)?;
    if scenarios.is_empty() {
        warn!("No scenarios matched");
        return Ok(());
    }

    let runner = ScenarioRunner::new().keep_scratch(keep_scratch);
    let summary = runner.run_scenarios(&scenarios);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    if !summary.all_passed() {
        bail!("{} of {} scenarios failed", summary.failed, summary.total);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    for result in &summary.results {
        let line = format!("{} ({} ms)", result.name, result.duration_ms);
        if result.passed {
            print_success(&line);
        } else {
            print_error(&line);
            if let Some(ref reason) = result.failure_reason {
                print_info(reason);
            }
        }
    }
    println!();
    println!("Passed: {}/{}", summary.passed, summary.total);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_overrides() {
        let config = Config::default();
        let dir = PathBuf::from("/srv/downloads");
        let updated =
            apply_save_overrides(&config, Some("desktop"), Some("Clips"), Some(&dir), true)
                .unwrap();

        assert_eq!(updated.target.kind, TargetKind::Desktop);
        assert_eq!(updated.album.name, "Clips");
        assert_eq!(updated.desktop.downloads_dir, Some(dir));
        assert!(!updated.desktop.reveal_in_file_browser);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let config = Config::default();
        let updated = apply_save_overrides(&config, None, None, None, false).unwrap();
        assert_eq!(updated, config);
    }

    #[test]
    fn test_unknown_target() {
        assert!(parse_target("tv").is_err());
        assert_eq!(parse_target("Mobile").unwrap(), TargetKind::Mobile);
    }

    #[test]
    fn test_save_file_desktop() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("clip.mp4");
        std::fs::write(&source, b"video").unwrap();
        let downloads = temp.path().join("Downloads");
        std::fs::create_dir(&downloads).unwrap();

        let config = apply_save_overrides(
            &Config::default(),
            Some("desktop"),
            None,
            Some(&downloads),
            true,
        )
        .unwrap();
        save_file(&source, &config).unwrap();

        assert!(!source.exists());
        assert_eq!(std::fs::read(downloads.join("clip.mp4")).unwrap(), b"video");
    }

    #[test]
    fn test_save_file_mobile_without_backend() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("clip.mp4");
        std::fs::write(&source, b"video").unwrap();

        let config =
            apply_save_overrides(&Config::default(), Some("mobile"), None, None, false).unwrap();
        assert!(save_file(&source, &config).is_err());
        assert!(source.exists());
    }

    #[test]
    fn test_save_missing_file() {
        let config = Config::default();
        assert!(save_file(Path::new("/nonexistent/clip.mp4"), &config).is_err());
    }

    #[test]
    fn test_select_scenarios() {
        let all = select_scenarios(&[], None).unwrap();
        assert_eq!(all.len(), ScenarioLibrary::all_scenarios().len());

        let named = select_scenarios(&["desktop_move".to_string()], None).unwrap();
        assert_eq!(named.len(), 1);

        let desktop = select_scenarios(&[], Some("desktop")).unwrap();
        assert!(!desktop.is_empty());
        assert!(desktop.iter().all(|s| s.has_tag("desktop")));

        assert!(select_scenarios(&["missing".to_string()], None).is_err());
    }

    #[test]
    fn test_generate_config_to_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("saver.toml");
        generate_config_file(Some(path.clone())).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.album.name, "SwiftyYTDL");
    }
}
