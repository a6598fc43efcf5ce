//! Frame conversion configuration types

/// Orientation correction applied to every converted image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    None,
    Rotate180,
}

/// Configuration for raw frame conversion
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    /// Rotation applied after channel reordering, for both output shapes
    pub rotation: Rotation,
}

impl ConverterConfig {
    pub fn builder() -> ConverterConfigBuilder {
        ConverterConfigBuilder::default()
    }
}

/// Builder for ConverterConfig
#[derive(Default)]
pub struct ConverterConfigBuilder {
    rotation: Option<Rotation>,
}

impl ConverterConfigBuilder {
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn build(self) -> ConverterConfig {
        let default = ConverterConfig::default();
        ConverterConfig {
            rotation: self.rotation.unwrap_or(default.rotation),
        }
    }
}
