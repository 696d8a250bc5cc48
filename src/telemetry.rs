//! Tracing bootstrap. The terminal is owned by the TUI, so events go to a plain
//! log file instead of stdout.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};

/// Install a global fmt subscriber appending to `path`. A subscriber that is
/// already installed (tests, embedding) is left in place.
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .ok();

    Ok(())
}

/// Like [`init`], but a log file that cannot be opened only costs the log.
/// The warning goes to stderr before the TUI takes over the screen.
pub fn init_or_warn(path: &Path) -> bool {
    match init(path) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unopenable_log_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("library.log");

        assert!(init(&path).is_err());
        assert!(!init_or_warn(&path));
    }

    #[test]
    fn log_file_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.log");

        assert!(init_or_warn(&path));
        assert!(path.exists());
    }
}
