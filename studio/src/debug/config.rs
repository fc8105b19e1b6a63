//! Logging configuration from environment variables

use std::path::PathBuf;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "studio=info,warn";

/// Log file name prefix. The daily appender adds the date.
pub const LOG_FILE_NAME: &str = "studio.log";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Directory holding the rolling log files
    pub log_dir: PathBuf,
    /// Log level filter (e.g., "studio=debug,info")
    pub log_level: String,
    /// Write JSON lines to the log file instead of plain text
    pub json: bool,
    /// Mirror logs to stderr
    pub stderr: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_FILTER.to_string(),
            json: false,
            stderr: true,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    ///
    /// - `STUDIO_LOG_DIR`: log directory (default `logs`)
    /// - `RUST_LOG`: filter (default [`DEFAULT_FILTER`])
    /// - `STUDIO_LOG_JSON=1`: JSON file output
    /// - `STUDIO_LOG_STDERR=0`: no stderr output
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            log_dir: lookup("STUDIO_LOG_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: lookup("RUST_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_level),
            json: lookup("STUDIO_LOG_JSON").map(|v| v == "1").unwrap_or(defaults.json),
            stderr: lookup("STUDIO_LOG_STDERR").map(|v| v != "0").unwrap_or(defaults.stderr),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }
}
