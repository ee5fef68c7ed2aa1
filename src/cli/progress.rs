//! Console output utilities for the CLI
//!
//! Spinner shown while a blocking save runs, consistent status lines, and the
//! console/file writer used for logging.

use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::io::Write;
use std::time::Duration;

/// Get the spinner style for blocking operations
fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⣾⣽⣻⢿⡿⣟⣯⣷ ")
}

// ============================================================================
// Console output helpers
// ============================================================================

/// Print a success message with checkmark
pub fn print_success(msg: &str) {
    println!("  ✓ {}", msg);
}

/// Print an info message with bullet
pub fn print_info(msg: &str) {
    println!("  • {}", msg);
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("  ⚠ {}", msg);
}

/// Print an error message
pub fn print_error(msg: &str) {
    println!("  ✗ {}", msg);
}

// ============================================================================
// Spinner for a single blocking save
// ============================================================================

/// Spinner displayed while the saver waits on the platform.
///
/// Log lines written to stderr while the spinner draws would tear it, so
/// console logging is capped at warnings until [`SaveSpinner::finish`]. At
/// debug or trace level the spinner stays hidden and logging is untouched.
pub struct SaveSpinner {
    spinner: ProgressBar,
    restore_level: Option<LevelFilter>,
}

impl SaveSpinner {
    /// Start spinning with `msg`
    pub fn start(msg: &str) -> Self {
        let current = log::max_level();
        let cap = spinner_log_cap(current);

        let spinner = match cap {
            Some(level) => {
                log::set_max_level(level);
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(spinner_style());
                spinner.enable_steady_tick(Duration::from_millis(80));
                spinner
            }
            None => ProgressBar::hidden(),
        };
        spinner.set_message(msg.to_string());

        Self {
            spinner,
            restore_level: cap.map(|_| current),
        }
    }

    /// Replace the spinner message
    pub fn set_message(&self, msg: &str) {
        self.spinner.set_message(msg.to_string());
    }

    /// Remove the spinner from the terminal and restore logging
    pub fn finish(self) {
        self.spinner.finish_and_clear();
        if let Some(level) = self.restore_level {
            log::set_max_level(level);
        }
    }
}

/// Log level to use while a spinner is drawn, or `None` to skip the spinner
fn spinner_log_cap(current: LevelFilter) -> Option<LevelFilter> {
    if current > LevelFilter::Info {
        None
    } else {
        Some(current.min(LevelFilter::Warn))
    }
}

// ============================================================================
// Logging writer
// ============================================================================

/// Writer that duplicates log output to stderr and a log file
pub struct DualWriter {
    pub console: std::io::Stderr,
    pub file: std::fs::File,
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let _ = self.console.write(buf);
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let _ = self.console.flush();
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_dual_writer_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("saver.log");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = DualWriter {
            console: std::io::stderr(),
            file,
        };
        writeln!(writer, "[INFO] saved").unwrap();
        writer.flush().unwrap();

        let mut content = String::new();
        std::fs::File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "[INFO] saved\n");
    }

    #[test]
    fn test_spinner_redraws_while_work_runs() {
        let spinner = SaveSpinner::start("Saving video.mp4");
        let bar = spinner.spinner.clone();
        let (tx, rx) = std::sync::mpsc::channel();

        // Blocking work runs on this thread; another thread must still be
        // able to update the bar meanwhile.
        let updater = std::thread::spawn(move || {
            bar.set_message("Importing video.mp4");
            tx.send(()).unwrap();
        });
        assert!(rx.recv_timeout(Duration::from_millis(300)).is_ok());
        updater.join().unwrap();

        spinner.set_message("Done");
        spinner.finish();
    }

    #[test]
    fn test_spinner_log_cap() {
        assert_eq!(spinner_log_cap(LevelFilter::Info), Some(LevelFilter::Warn));
        assert_eq!(spinner_log_cap(LevelFilter::Warn), Some(LevelFilter::Warn));
        assert_eq!(spinner_log_cap(LevelFilter::Error), Some(LevelFilter::Error));
        assert_eq!(spinner_log_cap(LevelFilter::Off), Some(LevelFilter::Off));
        assert_eq!(spinner_log_cap(LevelFilter::Debug), None);
        assert_eq!(spinner_log_cap(LevelFilter::Trace), None);
    }
}
