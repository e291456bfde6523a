//! Persisted fixture configuration

use serde::{Deserialize, Serialize};

use luxgrid_core::{Placement, Shape};

use crate::protocol::OutputSettings;

fn default_enabled() -> bool {
    true
}

fn default_brightness() -> f32 {
    1.0
}

/// Everything needed to restore a fixture.
///
/// The output block is omitted when no protocol is selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureConfig {
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_brightness")]
    pub brightness: f32,
    #[serde(default)]
    pub placement: Placement,
    pub shape: Shape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSettings>,
}

impl FixtureConfig {
    /// A default configuration for the given shape
    pub fn new(label: impl Into<String>, shape: Shape) -> Self {
        Self {
            label: label.into(),
            enabled: true,
            brightness: 1.0,
            placement: Placement::origin(),
            shape,
            output: None,
        }
    }

    pub fn with_output(mut self, output: OutputSettings) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}
