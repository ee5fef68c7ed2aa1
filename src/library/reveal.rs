//! Reveal files in the platform file browser
//!
//! Revealing is a best-effort UI side effect: callers log failures and move on.

use log::debug;
use std::io;
use std::path::Path;
#[cfg(any(target_os = "macos", target_os = "windows", test))]
use std::process::{Command, ExitStatus};
#[cfg(any(target_os = "macos", target_os = "windows", test))]
use std::thread::{self, JoinHandle};

/// Shows a file to the user in the platform file browser
pub trait FileRevealer: Send + Sync {
    /// Open the file browser at `root` with `file` selected where supported
    fn reveal(&self, file: &Path, root: &Path) -> io::Result<()>;
}

/// Reveal through the platform's native file browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRevealer;

impl FileRevealer for SystemRevealer {
    #[cfg(target_os = "macos")]
    fn reveal(&self, file: &Path, _root: &Path) -> io::Result<()> {
        debug!("Revealing {} in Finder", file.display());
        spawn_reaped(Command::new("open").arg("-R").arg(file)).map(|_| ())
    }

    #[cfg(target_os = "windows")]
    fn reveal(&self, file: &Path, _root: &Path) -> io::Result<()> {
        debug!("Revealing {} in Explorer", file.display());
        let mut select = std::ffi::OsString::from("/select,");
        select.push(file.as_os_str());
        spawn_reaped(Command::new("explorer").arg(select)).map(|_| ())
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    fn reveal(&self, file: &Path, root: &Path) -> io::Result<()> {
        // No portable way to preselect a file; open the containing folder.
        let folder = file.parent().unwrap_or(root);
        debug!("Opening {} in the file browser", folder.display());
        open::that_detached(folder)
    }
}

/// Start `command` and wait for it on a helper thread so it does not linger
/// as a zombie once the file browser has been asked to show the file
#[cfg(any(target_os = "macos", target_os = "windows", test))]
fn spawn_reaped(command: &mut Command) -> io::Result<JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command.spawn()?;
    Ok(thread::spawn(move || child.wait()))
}

/// Revealer that does nothing (reveal disabled in configuration)
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRevealer;

impl FileRevealer for NoopRevealer {
    fn reveal(&self, _file: &Path, _root: &Path) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_spawned_process_is_waited_for() {
        let waiter = spawn_reaped(&mut Command::new("true")).unwrap();
        let status = waiter.join().unwrap().unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let result = spawn_reaped(&mut Command::new("library-saver-no-such-program"));
        assert!(result.is_err());
    }

    #[test]
    fn test_noop_revealer() {
        assert!(NoopRevealer
            .reveal(Path::new("/tmp/video.mp4"), Path::new("/tmp"))
            .is_ok());
    }
}
