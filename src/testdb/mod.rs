//! Test Database Module
//!
//! This module provides a testing framework for the library saver that
//! exercises every save path without a real photo library.
//!
//! # Features
//!
//! - **Mock Photo Library**: In-memory albums and assets behind the same
//!   callback-based interface the platform exposes, answering from
//!   background threads
//! - **Failure Injection**: Denied access, album and asset errors, vanished
//!   albums, dropped callbacks, cleanup failures
//! - **Test Scenarios**: Named scenarios for both the mobile and desktop targets
//! - **Scenario Runner**: Runs scenarios in scratch directories and verifies
//!   outcomes, leftover files and moved-file integrity
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use library_saver::testdb::{ScenarioLibrary, ScenarioRunner};
//!
//! let runner = ScenarioRunner::new();
//! let summary = runner.run_all();
//! println!("Passed: {}/{}", summary.passed, summary.total);
//!
//! let result = runner.run(&ScenarioLibrary::mobile_album_lookup_fails());
//! assert!(result.passed);
//! ```

pub mod mock_library;
pub mod runner;
pub mod scenarios;

// Re-export commonly used types for convenience
pub use mock_library::{MockAlbum, MockAsset, MockLibraryConfig, MockPhotoLibrary};
pub use runner::{RunSummary, ScenarioResult, ScenarioRunner};
pub use scenarios::{DesktopSetup, ExpectedResults, ScenarioLibrary, ScenarioTarget, TestScenario};

/// Print available scenarios to console, grouped by their first tag
pub fn print_available_scenarios() {
    println!();
    println!("Available scenarios:");
    println!();

    let scenarios = ScenarioLibrary::all_scenarios();
    let mut by_category: std::collections::BTreeMap<String, Vec<&TestScenario>> =
        std::collections::BTreeMap::new();

    for scenario in &scenarios {
        let category = scenario
            .tags
            .first()
            .cloned()
            .unwrap_or_else(|| "other".to_string());
        by_category.entry(category).or_default().push(scenario);
    }

    for (category, scenarios) in &by_category {
        println!("  {}", category.to_uppercase());
        for scenario in scenarios {
            println!("   • {} - {}", scenario.name, scenario.description);
        }
        println!();
    }

    println!("Total: {} scenarios available", scenarios.len());
    println!();
}
