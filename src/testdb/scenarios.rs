//! Predefined save scenarios
//!
//! Each scenario describes a library target setup, the files to save and the
//! outcome a correct saver must produce. They cover the success paths and
//! every failure kind a save can end in.

use super::mock_library::MockLibraryConfig;
use crate::library::traits::{AuthorizationStatus, PlatformError, TargetKind};
use std::time::Duration;

/// How the desktop scratch area is prepared
#[derive(Debug, Clone)]
pub struct DesktopSetup {
    /// Create the downloads directory before saving
    pub create_downloads_dir: bool,
    /// Leave a file with the same name in the downloads directory
    pub preexisting_destination: bool,
}

impl Default for DesktopSetup {
    fn default() -> Self {
        Self {
            create_downloads_dir: true,
            preexisting_destination: false,
        }
    }
}

/// Target-specific setup of a scenario
#[derive(Debug, Clone)]
pub enum ScenarioTarget {
    /// Photos album backed by the mock library
    Mobile(MockLibraryConfig),
    /// Downloads folder in a scratch directory
    Desktop(DesktopSetup),
}

impl ScenarioTarget {
    pub fn kind(&self) -> TargetKind {
        match self {
            ScenarioTarget::Mobile(_) => TargetKind::Mobile,
            ScenarioTarget::Desktop(_) => TargetKind::Desktop,
        }
    }
}

/// Expected results from running a scenario
#[derive(Debug, Clone, Default)]
pub struct ExpectedResults {
    /// Every save should succeed
    pub should_succeed: bool,
    /// Expected error kind of the failing save (if should_succeed is false)
    pub expected_error: Option<String>,
    /// Whether the source files still exist afterwards
    pub source_remains: bool,
    /// Assets expected in the album afterwards (mobile)
    pub assets_in_album: usize,
    /// Album creation requests expected across all saves (mobile)
    pub album_creations: usize,
}

/// A complete save scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    /// Scenario name for identification
    pub name: String,
    /// Description of what this scenario tests
    pub description: String,
    /// Target setup
    pub target: ScenarioTarget,
    /// Names of the files saved, in order
    pub files: Vec<String>,
    /// Expected outcome
    pub expected: ExpectedResults,
    /// Tags for filtering scenarios
    pub tags: Vec<String>,
}

impl TestScenario {
    /// Create a new scenario saving a single `video.mp4`
    pub fn new(
        name: &str,
        description: &str,
        target: ScenarioTarget,
        expected: ExpectedResults,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            target,
            files: vec!["video.mp4".to_string()],
            expected,
            tags: Vec::new(),
        }
    }

    /// Save these files instead of the default one
    pub fn with_files(mut self, files: Vec<&str>) -> Self {
        self.files = files.into_iter().map(String::from).collect();
        self
    }

    /// Add tags to the scenario
    pub fn with_tags(mut self, tags: Vec<&str>) -> Self {
        self.tags = tags.into_iter().map(String::from).collect();
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

fn failure(kind: &str) -> ExpectedResults {
    ExpectedResults {
        should_succeed: false,
        expected_error: Some(kind.to_string()),
        source_remains: true,
        ..Default::default()
    }
}

/// Collection of all predefined scenarios
pub struct ScenarioLibrary;

impl ScenarioLibrary {
    // =========================================================================
    // MOBILE SCENARIOS
    // =========================================================================

    /// Scenario: first save creates the album and imports the video
    pub fn mobile_first_save() -> TestScenario {
        TestScenario::new(
            "mobile_first_save",
            "Authorized, album absent: album is created, video imported, temp file removed",
            ScenarioTarget::Mobile(MockLibraryConfig {
                callback_latency: Duration::from_millis(5),
                ..Default::default()
            }),
            ExpectedResults {
                should_succeed: true,
                source_remains: false,
                assets_in_album: 1,
                album_creations: 1,
                ..Default::default()
            },
        )
        .with_tags(vec!["mobile", "basic"])
    }

    /// Scenario: album already exists
    pub fn mobile_existing_album() -> TestScenario {
        TestScenario::new(
            "mobile_existing_album",
            "Album already in the library is reused without a creation request",
            ScenarioTarget::Mobile(MockLibraryConfig {
                existing_albums: vec!["Recents".to_string(), "SwiftyYTDL".to_string()],
                ..Default::default()
            }),
            ExpectedResults {
                should_succeed: true,
                source_remains: false,
                assets_in_album: 1,
                album_creations: 0,
                ..Default::default()
            },
        )
        .with_tags(vec!["mobile", "album"])
    }

    /// Scenario: two saves share one album
    pub fn mobile_repeat_saves() -> TestScenario {
        TestScenario::new(
            "mobile_repeat_saves",
            "Two downloads in a row land in the same album, created once",
            ScenarioTarget::Mobile(MockLibraryConfig::default()),
            ExpectedResults {
                should_succeed: true,
                source_remains: false,
                assets_in_album: 2,
                album_creations: 1,
                ..Default::default()
            },
        )
        .with_files(vec!["first.mp4", "second.mov"])
        .with_tags(vec!["mobile", "album", "basic"])
    }

    /// Scenario: limited access still saves
    pub fn mobile_limited_access() -> TestScenario {
        TestScenario::new(
            "mobile_limited_access",
            "Limited photo library access is enough to add a video",
            ScenarioTarget::Mobile(MockLibraryConfig {
                authorization: AuthorizationStatus::Limited,
                ..Default::default()
            }),
            ExpectedResults {
                should_succeed: true,
                source_remains: false,
                assets_in_album: 1,
                album_creations: 1,
                ..Default::default()
            },
        )
        .with_tags(vec!["mobile", "authorization"])
    }

    /// Scenario: user denied access
    pub fn mobile_access_denied() -> TestScenario {
        TestScenario::new(
            "mobile_access_denied",
            "Denied authorization fails before touching the library or the file",
            ScenarioTarget::Mobile(MockLibraryConfig {
                authorization: AuthorizationStatus::Denied,
                ..Default::default()
            }),
            failure("AccessDenied"),
        )
        .with_tags(vec!["mobile", "authorization", "error"])
    }

    /// Scenario: permission prompt never answered
    pub fn mobile_not_determined() -> TestScenario {
        TestScenario::new(
            "mobile_not_determined",
            "Undetermined authorization is treated as denied",
            ScenarioTarget::Mobile(MockLibraryConfig {
                authorization: AuthorizationStatus::NotDetermined,
                ..Default::default()
            }),
            failure("AccessDenied"),
        )
        .with_tags(vec!["mobile", "authorization", "error"])
    }

    /// Scenario: album creation request fails
    pub fn mobile_album_creation_fails() -> TestScenario {
        TestScenario::new(
            "mobile_album_creation_fails",
            "Platform error while creating the album surfaces as AlbumCreationFailed",
            ScenarioTarget::Mobile(MockLibraryConfig {
                album_creation_error: Some(PlatformError::new(3300, "library is busy")),
                ..Default::default()
            }),
            ExpectedResults {
                album_creations: 1,
                ..failure("AlbumCreationFailed")
            },
        )
        .with_tags(vec!["mobile", "album", "error"])
    }

    /// Scenario: created album cannot be found again
    pub fn mobile_album_lookup_fails() -> TestScenario {
        TestScenario::new(
            "mobile_album_lookup_fails",
            "Album creation reports success but the re-fetch comes back empty",
            ScenarioTarget::Mobile(MockLibraryConfig {
                hide_created_albums: true,
                ..Default::default()
            }),
            ExpectedResults {
                album_creations: 1,
                ..failure("AlbumLookupFailed")
            },
        )
        .with_tags(vec!["mobile", "album", "error", "edge-case"])
    }

    /// Scenario: asset creation request fails
    pub fn mobile_asset_creation_fails() -> TestScenario {
        TestScenario::new(
            "mobile_asset_creation_fails",
            "Platform error while importing the video keeps the temp file",
            ScenarioTarget::Mobile(MockLibraryConfig {
                existing_albums: vec!["SwiftyYTDL".to_string()],
                asset_creation_error: Some(PlatformError::new(3302, "unsupported video")),
                ..Default::default()
            }),
            failure("AssetCreationFailed"),
        )
        .with_tags(vec!["mobile", "asset", "error"])
    }

    /// Scenario: temp file cannot be removed after import
    pub fn mobile_cleanup_fails() -> TestScenario {
        TestScenario::new(
            "mobile_cleanup_fails",
            "Video is imported but removing the temp file fails",
            ScenarioTarget::Mobile(MockLibraryConfig {
                consume_source_on_import: true,
                ..Default::default()
            }),
            ExpectedResults {
                should_succeed: false,
                expected_error: Some("CleanupFailed".to_string()),
                source_remains: false,
                assets_in_album: 1,
                album_creations: 1,
            },
        )
        .with_tags(vec!["mobile", "cleanup", "error", "edge-case"])
    }

    /// Scenario: platform discards the change callback
    pub fn mobile_dropped_callback() -> TestScenario {
        TestScenario::new(
            "mobile_dropped_callback",
            "A change request whose callback is dropped fails instead of hanging",
            ScenarioTarget::Mobile(MockLibraryConfig {
                existing_albums: vec!["SwiftyYTDL".to_string()],
                drop_change_callbacks: true,
                ..Default::default()
            }),
            failure("AssetCreationFailed"),
        )
        .with_tags(vec!["mobile", "asset", "error", "edge-case"])
    }

    // =========================================================================
    // DESKTOP SCENARIOS
    // =========================================================================

    /// Scenario: move into Downloads
    pub fn desktop_move() -> TestScenario {
        TestScenario::new(
            "desktop_move",
            "File is moved byte-for-byte into the downloads directory",
            ScenarioTarget::Desktop(DesktopSetup::default()),
            ExpectedResults {
                should_succeed: true,
                source_remains: false,
                ..Default::default()
            },
        )
        .with_tags(vec!["desktop", "basic"])
    }

    /// Scenario: destination name already taken
    pub fn desktop_name_collision() -> TestScenario {
        TestScenario::new(
            "desktop_name_collision",
            "A file with the same name in Downloads is replaced by the new download",
            ScenarioTarget::Desktop(DesktopSetup {
                preexisting_destination: true,
                ..Default::default()
            }),
            ExpectedResults {
                should_succeed: true,
                source_remains: false,
                ..Default::default()
            },
        )
        .with_tags(vec!["desktop", "edge-case"])
    }

    /// Scenario: downloads directory missing
    pub fn desktop_missing_downloads_dir() -> TestScenario {
        TestScenario::new(
            "desktop_missing_downloads_dir",
            "Moving into a directory that does not exist fails and keeps the file",
            ScenarioTarget::Desktop(DesktopSetup {
                create_downloads_dir: false,
                ..Default::default()
            }),
            failure("MoveFailed"),
        )
        .with_tags(vec!["desktop", "error"])
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Get all scenarios
    pub fn all_scenarios() -> Vec<TestScenario> {
        vec![
            Self::mobile_first_save(),
            Self::mobile_existing_album(),
            Self::mobile_repeat_saves(),
            Self::mobile_limited_access(),
            Self::mobile_access_denied(),
            Self::mobile_not_determined(),
            Self::mobile_album_creation_fails(),
            Self::mobile_album_lookup_fails(),
            Self::mobile_asset_creation_fails(),
            Self::mobile_cleanup_fails(),
            Self::mobile_dropped_callback(),
            Self::desktop_move(),
            Self::desktop_name_collision(),
            Self::desktop_missing_downloads_dir(),
        ]
    }

    /// Get scenarios by tag
    pub fn by_tag(tag: &str) -> Vec<TestScenario> {
        Self::all_scenarios()
            .into_iter()
            .filter(|s| s.has_tag(tag))
            .collect()
    }

    /// Get a scenario by name
    pub fn get_by_name(name: &str) -> Option<TestScenario> {
        Self::all_scenarios().into_iter().find(|s| s.name == name)
    }

    /// List scenario names
    pub fn list_names() -> Vec<String> {
        Self::all_scenarios().into_iter().map(|s| s.name).collect()
    }

    /// List all tags used by any scenario, sorted
    pub fn list_tags() -> Vec<String> {
        let mut tags: Vec<String> = Self::all_scenarios()
            .into_iter()
            .flat_map(|s| s.tags)
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_scenario_names_are_unique() {
        let names = ScenarioLibrary::list_names();
        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_every_failure_kind_has_a_scenario() {
        let kinds: HashSet<String> = ScenarioLibrary::all_scenarios()
            .into_iter()
            .filter_map(|s| s.expected.expected_error)
            .collect();
        for kind in [
            "AccessDenied",
            "AlbumCreationFailed",
            "AlbumLookupFailed",
            "AssetCreationFailed",
            "CleanupFailed",
            "MoveFailed",
        ] {
            assert!(kinds.contains(kind), "no scenario for {}", kind);
        }
    }

    #[test]
    fn test_by_tag() {
        let desktop = ScenarioLibrary::by_tag("desktop");
        assert!(!desktop.is_empty());
        assert!(desktop.iter().all(|s| s.target.kind() == TargetKind::Desktop));
        assert!(ScenarioLibrary::by_tag("no-such-tag").is_empty());
    }

    #[test]
    fn test_get_by_name() {
        let scenario = ScenarioLibrary::get_by_name("mobile_repeat_saves").unwrap();
        assert_eq!(scenario.files.len(), 2);
        assert!(ScenarioLibrary::get_by_name("missing").is_none());
    }

    #[test]
    fn test_list_tags_sorted_and_unique() {
        let tags = ScenarioLibrary::list_tags();
        let mut sorted = tags.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(tags, sorted);
        assert!(tags.contains(&"edge-case".to_string()));
    }
}
