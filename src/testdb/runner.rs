//! Scenario runner
//!
//! Runs save scenarios in scratch directories under the system temp dir,
//! checks the outcome against the scenario's expectations and summarizes
//! the results.

use super::mock_library::MockPhotoLibrary;
use super::scenarios::{ScenarioLibrary, ScenarioTarget, TestScenario};
use crate::core::config::DEFAULT_ALBUM_NAME;
use crate::core::error::LibraryError;
use crate::core::media_file::MediaFile;
use crate::core::saver::LibrarySaver;
use crate::library::traits::Placement;
use crate::library::{DesktopFileTarget, MobileLibraryTarget};
use log::{debug, info};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    /// Scenario name
    pub name: String,
    /// Whether the scenario met its expectations
    pub passed: bool,
    /// Execution time in milliseconds
    pub duration_ms: u128,
    /// Number of saves that succeeded
    pub saved: usize,
    /// Error kind of the first failing save, if any
    pub error: Option<String>,
    /// Failure reason (if any)
    pub failure_reason: Option<String>,
}

impl ScenarioResult {
    fn new(name: &str, duration: Duration) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            duration_ms: duration.as_millis(),
            saved: 0,
            error: None,
            failure_reason: None,
        }
    }

    fn fail(mut self, reason: String) -> Self {
        self.passed = false;
        self.failure_reason = Some(reason);
        self
    }
}

/// Summary of a scenario run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<ScenarioResult>,
}

impl RunSummary {
    fn push(&mut self, result: ScenarioResult) {
        self.total += 1;
        if result.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// What a run left behind, checked against the expectations
struct Observation {
    saved: usize,
    error: Option<LibraryError>,
    sources_remaining: usize,
    assets_in_album: usize,
    album_creations: usize,
    integrity_failures: Vec<String>,
}

/// Executes scenarios against real targets in scratch directories
pub struct ScenarioRunner {
    scratch_root: PathBuf,
    keep_scratch: bool,
}

impl ScenarioRunner {
    /// Create a runner using the system temp directory
    pub fn new() -> Self {
        Self {
            scratch_root: std::env::temp_dir()
                .join(format!("library_saver_scenarios_{}", std::process::id())),
            keep_scratch: false,
        }
    }

    /// Use a specific scratch directory
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = root.into();
        self
    }

    /// Leave scratch directories in place for inspection
    pub fn keep_scratch(mut self, keep: bool) -> Self {
        self.keep_scratch = keep;
        self
    }

    /// Run every known scenario
    pub fn run_all(&self) -> RunSummary {
        self.run_scenarios(&ScenarioLibrary::all_scenarios())
    }

    /// Run the given scenarios in order
    pub fn run_scenarios(&self, scenarios: &[TestScenario]) -> RunSummary {
        let mut summary = RunSummary::default();
        for scenario in scenarios {
            summary.push(self.run(scenario));
        }
        info!(
            "Scenario run complete: {}/{} passed",
            summary.passed, summary.total
        );
        summary
    }

    /// Run one scenario
    pub fn run(&self, scenario: &TestScenario) -> ScenarioResult {
        let started = Instant::now();
        let scratch = self.scratch_root.join(&scenario.name);
        debug!("Running scenario '{}' in {}", scenario.name, scratch.display());

        let outcome = self.execute(scenario, &scratch);

        if !self.keep_scratch {
            let _ = fs::remove_dir_all(&scratch);
        }

        let result = ScenarioResult::new(&scenario.name, started.elapsed());
        match outcome {
            Ok(observed) => check_expectations(scenario, observed, result),
            Err(e) => result.fail(format!("scenario setup failed: {}", e)),
        }
    }

    fn execute(&self, scenario: &TestScenario, scratch: &Path) -> io::Result<Observation> {
        let _ = fs::remove_dir_all(scratch);
        let staging = scratch.join("staging");
        fs::create_dir_all(&staging)?;

        let mut sources = Vec::new();
        for (index, name) in scenario.files.iter().enumerate() {
            let path = staging.join(name);
            fs::write(&path, sample_video_bytes(index))?;
            sources.push(path);
        }

        let mut library = None;
        let saver = match &scenario.target {
            ScenarioTarget::Mobile(config) => {
                let mock = Arc::new(MockPhotoLibrary::with_config(config.clone()));
                library = Some(Arc::clone(&mock));
                LibrarySaver::new(Box::new(MobileLibraryTarget::new(mock)))
            }
            ScenarioTarget::Desktop(setup) => {
                let downloads = scratch.join("Downloads");
                if setup.create_downloads_dir {
                    fs::create_dir_all(&downloads)?;
                    if setup.preexisting_destination {
                        for name in &scenario.files {
                            fs::write(downloads.join(name), b"older download")?;
                        }
                    }
                }
                LibrarySaver::new(Box::new(
                    DesktopFileTarget::new()
                        .with_downloads_dir(downloads)
                        .without_reveal(),
                ))
            }
        };

        let digests = sources
            .iter()
            .map(|path| file_digest(path))
            .collect::<io::Result<Vec<_>>>()?;

        let mut observed = Observation {
            saved: 0,
            error: None,
            sources_remaining: 0,
            assets_in_album: 0,
            album_creations: 0,
            integrity_failures: Vec::new(),
        };

        for (source, digest) in sources.iter().zip(&digests) {
            match saver.save_to_library(MediaFile::new(source)) {
                Ok(placement) => {
                    observed.saved += 1;
                    if let Placement::Downloads { destination } = placement {
                        if file_digest(&destination)? != *digest {
                            observed
                                .integrity_failures
                                .push(destination.display().to_string());
                        }
                    }
                }
                Err(e) => {
                    observed.error = Some(e);
                    break;
                }
            }
        }

        observed.sources_remaining = sources.iter().filter(|p| p.exists()).count();
        if let Some(mock) = library {
            observed.album_creations = mock.album_creation_requests();
            observed.assets_in_album = mock
                .albums()
                .iter()
                .filter(|a| a.handle.title == DEFAULT_ALBUM_NAME)
                .map(|a| mock.assets_in(&a.handle).len())
                .sum();
        }

        Ok(observed)
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn check_expectations(
    scenario: &TestScenario,
    observed: Observation,
    mut result: ScenarioResult,
) -> ScenarioResult {
    let expected = &scenario.expected;
    result.saved = observed.saved;
    result.error = observed.error.as_ref().map(|e| e.kind().to_string());

    let mut problems = Vec::new();

    match (&observed.error, expected.should_succeed) {
        (None, true) | (Some(_), false) => {}
        (Some(e), true) => problems.push(format!("expected success, got {}", e)),
        (None, false) => problems.push("expected a failure, every save succeeded".to_string()),
    }
    if let (Some(want), Some(got)) = (&expected.expected_error, &result.error) {
        if want != got {
            problems.push(format!("expected {}, got {}", want, got));
        }
    }

    let remains = observed.sources_remaining > 0;
    if remains != expected.source_remains {
        problems.push(format!(
            "source files remaining: {} (expected {})",
            observed.sources_remaining,
            if expected.source_remains { "some" } else { "none" }
        ));
    }

    if let ScenarioTarget::Mobile(_) = scenario.target {
        if observed.assets_in_album != expected.assets_in_album {
            problems.push(format!(
                "assets in album: {} (expected {})",
                observed.assets_in_album, expected.assets_in_album
            ));
        }
        if observed.album_creations != expected.album_creations {
            problems.push(format!(
                "album creation requests: {} (expected {})",
                observed.album_creations, expected.album_creations
            ));
        }
    }

    for path in observed.integrity_failures {
        problems.push(format!("content changed while moving to {}", path));
    }

    if problems.is_empty() {
        result
    } else {
        result.fail(problems.join("; "))
    }
}

/// Deterministic fake MP4 payload, distinct per index
fn sample_video_bytes(index: usize) -> Vec<u8> {
    let mut bytes = b"\x00\x00\x00\x18ftypmp42\x00\x00\x00\x00mp42isom".to_vec();
    bytes.extend((0..8192usize).map(|i| ((i * 31 + index * 7) % 256) as u8));
    bytes
}

/// SHA-256 of a file's content, hex encoded
pub fn file_digest(path: &Path) -> io::Result<String> {
    let content = fs::read(path)?;
    let digest = Sha256::digest(&content);
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_all_scenarios_pass() {
        let temp = TempDir::new().unwrap();
        let runner = ScenarioRunner::new().with_scratch_root(temp.path());
        let summary = runner.run_all();

        let failures: Vec<_> = summary
            .results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| format!("{}: {:?}", r.name, r.failure_reason))
            .collect();
        assert!(failures.is_empty(), "failing scenarios: {:#?}", failures);
        assert_eq!(summary.total, ScenarioLibrary::all_scenarios().len());
    }

    #[test]
    fn test_wrong_expectation_is_reported() {
        let temp = TempDir::new().unwrap();
        let runner = ScenarioRunner::new().with_scratch_root(temp.path());
        let mut scenario = ScenarioLibrary::mobile_access_denied();
        scenario.expected.expected_error = Some("MoveFailed".to_string());

        let result = runner.run(&scenario);
        assert!(!result.passed);
        assert_eq!(result.error.as_deref(), Some("AccessDenied"));
        assert!(result.failure_reason.unwrap().contains("expected MoveFailed"));
    }

    #[test]
    fn test_scratch_is_removed_unless_kept() {
        let temp = TempDir::new().unwrap();
        let scenario = ScenarioLibrary::desktop_move();

        ScenarioRunner::new()
            .with_scratch_root(temp.path())
            .run(&scenario);
        assert!(!temp.path().join(&scenario.name).exists());

        ScenarioRunner::new()
            .with_scratch_root(temp.path())
            .keep_scratch(true)
            .run(&scenario);
        assert!(temp
            .path()
            .join(&scenario.name)
            .join("Downloads")
            .join("video.mp4")
            .exists());
    }

    #[test]
    fn test_file_digest_is_stable() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.bin");
        fs::write(&path, b"abc").unwrap();
        assert_eq!(
            file_digest(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
