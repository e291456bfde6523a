//! Error types for rig file I/O.

/// Result type alias for rig file operations.
pub type Result<T> = std::result::Result<T, IoError>;

/// Error type for reading and writing rig files.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// RON serialization error
    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),

    /// RON parse error, with position
    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// File written by another format version
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Version this build reads
        expected: String,
        /// Version stored in the file
        found: String,
    },

    /// Extension is not a known rig format
    #[error("Unsupported rig format: '{0}'")]
    UnsupportedFormat(String),

    /// File exceeds the load limit
    #[error("File too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge {
        /// Size on disk
        size: u64,
        /// Allowed size
        limit: u64,
    },

    /// Fixture configuration rejected while restoring
    #[error(transparent)]
    Control(#[from] luxgrid_control::ControlError),
}
