use std::path::{Path, PathBuf};
use std::time::Duration;

use os_api::RetryPolicy;
use serde::{Deserialize, Serialize};

use crate::errors::MedalLogError;

pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Optional user settings read from `settings.json` next to the executable.
/// Every field may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// medallog.txt to use when no path is given on the command line
    pub log_path: Option<PathBuf>,
    /// Total time to wait for another application to release the clipboard
    pub clipboard_timeout_ms: u64,
    /// Delay between clipboard open attempts
    pub clipboard_poll_ms: u64,
    /// `tracing` filter used when RUST_LOG is not set, e.g. "debug"
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            log_path: None,
            clipboard_timeout_ms: policy.timeout.as_millis() as u64,
            clipboard_poll_ms: policy.poll_interval.as_millis() as u64,
            log_level: None,
        }
    }
}

impl Settings {
    /// Location of the settings file: beside the executable, or the working
    /// directory if the executable path is unknown.
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .map(|mut p| {
                p.set_file_name(SETTINGS_FILE_NAME);
                p
            })
            .unwrap_or_else(|_| SETTINGS_FILE_NAME.into())
    }

    pub fn load() -> Result<Settings, MedalLogError> {
        Self::load_from(&Self::default_path())
    }

    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Settings, MedalLogError> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => {
                return Err(MedalLogError::InvalidSettings {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        };

        serde_json::from_str(&data).map_err(|e| MedalLogError::InvalidSettings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_millis(self.clipboard_timeout_ms),
            poll_interval: Duration::from_millis(self.clipboard_poll_ms.max(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join(SETTINGS_FILE_NAME)).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, r#"{ "log_path": "D:/saves/medallog.txt", "clipboard_timeout_ms": 2000 }"#)
            .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.log_path, Some(PathBuf::from("D:/saves/medallog.txt")));
        assert_eq!(settings.clipboard_timeout_ms, 2000);
        assert_eq!(settings.clipboard_poll_ms, 10);
        assert_eq!(settings.log_level, None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, MedalLogError::InvalidSettings { .. }));
    }

    #[test]
    fn test_zero_poll_interval_is_clamped() {
        let settings = Settings {
            clipboard_poll_ms: 0,
            ..Settings::default()
        };
        assert_eq!(settings.retry_policy().poll_interval, Duration::from_millis(1));
    }
}
