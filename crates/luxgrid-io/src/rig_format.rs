//! On-disk rig file format.
//!
//! A rig file is serialized to RON or JSON, picked by extension. It wraps the
//! [`Rig`] with a format version and timestamps.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use luxgrid_control::FixtureConfig;
use luxgrid_core::LogConfig;

use crate::error::{IoError, Result};

/// Version stamped into saved rig files.
///
/// Bump on breaking changes to [`RigFile`] or anything it contains.
pub const RIG_FILE_VERSION: &str = "1.0.0";

/// Maximum rig file size accepted on load (16 MiB).
pub const MAX_RIG_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Serialization format of a rig file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigFormat {
    Json,
    Ron,
}

impl RigFormat {
    /// Format for `path`: `.json` is JSON, `.ron` and `.lxg` are RON
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");
        match extension {
            "json" => Ok(RigFormat::Json),
            "ron" | "lxg" => Ok(RigFormat::Ron),
            _ => Err(IoError::UnsupportedFormat(extension.to_string())),
        }
    }
}

/// Rig-wide settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RigSettings {
    #[serde(default)]
    pub log_config: LogConfig,
}

/// A named set of fixtures and its settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rig {
    pub name: String,
    #[serde(default)]
    pub settings: RigSettings,
    #[serde(default)]
    pub fixtures: Vec<FixtureConfig>,
}

impl Rig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: RigSettings::default(),
            fixtures: Vec::new(),
        }
    }
}

/// Metadata associated with a rig file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RigMetadata {
    /// When the rig was first saved.
    pub created_at: DateTime<Utc>,
    /// When the rig was last saved.
    pub modified_at: DateTime<Utc>,
}

/// Top-level structure of a saved rig file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RigFile {
    pub version: String,
    pub metadata: RigMetadata,
    pub rig: Rig,
}

impl RigFile {
    /// Wrap a rig, stamping the current version and time
    pub fn new(rig: Rig) -> Self {
        let now = Utc::now();
        Self {
            version: RIG_FILE_VERSION.to_string(),
            metadata: RigMetadata {
                created_at: now,
                modified_at: now,
            },
            rig,
        }
    }

    /// Read a rig file; the version is not checked here.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with_limit(path, MAX_RIG_FILE_SIZE)
    }

    pub(crate) fn load_with_limit(path: &Path, limit: u64) -> Result<Self> {
        let format = RigFormat::from_path(path)?;
        let size = fs::metadata(path)?.len();
        if size > limit {
            return Err(IoError::FileTooLarge { size, limit });
        }

        let content = fs::read_to_string(path)?;
        let file: RigFile = match format {
            RigFormat::Json => serde_json::from_str(&content)?,
            RigFormat::Ron => ron::from_str(&content)?,
        };
        tracing::debug!("Read rig file {} ({} bytes)", path.display(), size);
        Ok(file)
    }

    /// Write the rig file, updating `modified_at`.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let format = RigFormat::from_path(path)?;
        self.metadata.modified_at = Utc::now();

        match format {
            RigFormat::Json => {
                let file = File::create(path)?;
                serde_json::to_writer_pretty(file, self)?;
            }
            RigFormat::Ron => {
                let config = ron::ser::PrettyConfig::default();
                let s = ron::ser::to_string_pretty(self, config)?;
                let mut file = File::create(path)?;
                file.write_all(s.as_bytes())?;
            }
        }
        tracing::debug!("Wrote rig file {}", path.display());
        Ok(())
    }
}
