//! Error types for fixture control and output addressing
use thiserror::Error;

use luxgrid_core::CoreError;

/// Control errors
#[derive(Error, Debug)]
pub enum ControlError {
    /// Geometry-side error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Invalid parameter value or a parameter the active protocol does not have
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Fixture id not present in the structure
    #[error("Fixture not found: {0}")]
    FixtureNotFound(u64),

    /// Stored configuration was written for another shape
    #[error("Shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Shape of the fixture being restored
        expected: String,
        /// Shape recorded in the configuration
        found: String,
    },
}

/// Result type for control operations
pub type Result<T> = std::result::Result<T, ControlError>;
