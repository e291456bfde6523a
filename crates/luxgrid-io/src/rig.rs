//! Rig I/O - High-level API
//!
//! Saving and loading rigs, with the format version check, and moving a rig
//! in and out of a [`Structure`].

use std::path::Path;

use luxgrid_control::Structure;

use crate::error::{IoError, Result};
use crate::rig_format::{Rig, RigFile, RigSettings, RIG_FILE_VERSION};

/// Save a rig to `path`, format picked by extension.
pub fn save_rig(rig: &Rig, path: &Path) -> Result<()> {
    let mut rig_file = RigFile::new(rig.clone());
    rig_file.save(path)?;
    tracing::info!(
        "Saved rig '{}' with {} fixtures to {}",
        rig.name,
        rig.fixtures.len(),
        path.display()
    );
    Ok(())
}

/// Load a rig from `path`, rejecting other format versions.
pub fn load_rig(path: &Path) -> Result<Rig> {
    let rig_file = RigFile::load(path)?;
    if rig_file.version != RIG_FILE_VERSION {
        return Err(IoError::VersionMismatch {
            expected: RIG_FILE_VERSION.to_string(),
            found: rig_file.version,
        });
    }
    tracing::info!(
        "Loaded rig '{}' with {} fixtures from {}",
        rig_file.rig.name,
        rig_file.rig.fixtures.len(),
        path.display()
    );
    Ok(rig_file.rig)
}

impl Rig {
    /// Capture the fixtures of a structure
    pub fn capture(name: impl Into<String>, settings: RigSettings, structure: &Structure) -> Self {
        Self {
            name: name.into(),
            settings,
            fixtures: structure.save(),
        }
    }

    /// Replace the fixtures of `structure` with this rig's
    pub fn restore(&self, structure: &mut Structure) -> Result<()> {
        structure.load(&self.fixtures)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use luxgrid_control::{OutputParam, ProtocolKind, StaticResolver};
    use luxgrid_core::ShapeKind;
    use tempfile::tempdir;

    fn structure() -> Structure {
        Structure::new(Arc::new(StaticResolver::new()))
    }

    #[test]
    fn test_rig_json_roundtrip_through_structure() {
        let mut original = structure();
        let id = original
            .add_fixture(ShapeKind::Grid.default_shape(), "Wall")
            .unwrap();
        original
            .set(id, OutputParam::Protocol(ProtocolKind::ArtNet))
            .unwrap();

        let dir = tempdir().unwrap();
        let path = dir.path().join("rig.json");
        save_rig(&Rig::capture("Stage", RigSettings::default(), &original), &path).unwrap();

        let rig = load_rig(&path).unwrap();
        assert_eq!(rig.name, "Stage");
        let mut restored = structure();
        rig.restore(&mut restored).unwrap();
        assert_eq!(
            restored.outputs().collect::<Vec<_>>(),
            original.outputs().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_version_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("old.ron");
        let mut rig_file = RigFile::new(Rig::new("Old"));
        rig_file.version = "0.1.0".to_string();
        rig_file.save(&path).unwrap();

        let result = load_rig(&path);
        if let Err(IoError::VersionMismatch { expected, found }) = result {
            assert_eq!(expected, RIG_FILE_VERSION);
            assert_eq!(found, "0.1.0");
        } else {
            panic!("expected VersionMismatch, got {:?}", result);
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_rig(&dir.path().join("missing.lxg"));
        assert!(matches!(result, Err(IoError::Io(_))));
    }
}
