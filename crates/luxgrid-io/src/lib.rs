//! Luxgrid IO - Rig files
//!
//! Reading and writing rigs (fixture configurations plus settings) as RON or
//! JSON files.
//!
//! - [`rig_format`] - On-disk format, versioning and size limits
//! - [`rig`] - Save/load with version checks, structure capture and restore
//! - [`error`] - Error types

#![allow(missing_docs)]

pub mod error;
pub mod rig;
pub mod rig_format;

pub use error::{IoError, Result};
pub use rig::{load_rig, save_rig};
pub use rig_format::{
    Rig, RigFile, RigFormat, RigMetadata, RigSettings, MAX_RIG_FILE_SIZE, RIG_FILE_VERSION,
};
