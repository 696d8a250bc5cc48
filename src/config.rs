//! Fixed runtime settings. The program takes no flags and reads no environment
//! variables; everything resolves relative to the working directory.

use std::path::PathBuf;

use crate::auth::Credentials;

/// SQLite file holding the `books` table.
const DB_FILE_NAME: &str = "new_library.db";
/// Log file written by the tracing subscriber. Stdout belongs to the TUI.
const LOG_FILE_NAME: &str = "library.log";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";

/// Everything the binary needs to boot.
#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub credentials: Credentials,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DB_FILE_NAME),
            log_path: PathBuf::from(LOG_FILE_NAME),
            credentials: Credentials::new(DEFAULT_USERNAME, DEFAULT_PASSWORD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_relative_to_the_working_directory() {
        let settings = Settings::default();
        assert_eq!(settings.db_path, PathBuf::from("new_library.db"));
        assert!(settings.db_path.is_relative());
        assert!(settings.log_path.is_relative());
        assert!(settings.credentials.matches("admin", "admin"));
    }
}
