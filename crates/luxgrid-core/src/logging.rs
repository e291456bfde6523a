//! Logging configuration
//!
//! Persisted with the rig settings and consumed by the binary when it installs
//! the tracing subscriber.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Where and how much to log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level name: error, warn, info, debug or trace
    pub level: String,
    /// Log to stderr
    pub console_output: bool,
    /// Log to a file in `log_directory`
    pub file_output: bool,
    pub log_directory: PathBuf,
    /// File name prefix, followed by a timestamp
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// How many log files to keep
    pub max_files: usize,
}

fn default_file_prefix() -> String {
    "luxgrid".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            file_output: false,
            log_directory: PathBuf::from("logs"),
            file_prefix: default_file_prefix(),
            max_files: 10,
        }
    }
}

impl LogConfig {
    /// Parsed level, falling back to INFO on unknown names
    pub fn parse_level(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::INFO)
    }

    pub fn ensure_log_directory(&self) -> io::Result<()> {
        fs::create_dir_all(&self.log_directory)
    }

    /// Path of the log file for a session started now
    pub fn current_log_path(&self) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        self.log_directory
            .join(format!("{}_{}.log", self.file_prefix, stamp))
    }

    /// Remove the oldest log files beyond `max_files`.
    ///
    /// Returns how many files were deleted.
    pub fn cleanup_old_logs(&self) -> io::Result<usize> {
        if !self.log_directory.exists() {
            return Ok(0);
        }
        let prefix = format!("{}_", self.file_prefix);
        let mut logs: Vec<PathBuf> = fs::read_dir(&self.log_directory)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension().is_some_and(|ext| ext == "log")
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with(&prefix))
            })
            .collect();
        if logs.len() <= self.max_files {
            return Ok(0);
        }
        // Timestamped names sort chronologically
        logs.sort();
        let excess = logs.len() - self.max_files;
        for path in &logs[..excess] {
            fs::remove_file(path)?;
        }
        Ok(excess)
    }
}
