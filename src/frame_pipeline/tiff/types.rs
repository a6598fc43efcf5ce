//! Snapshot configuration types

use std::path::{Path, PathBuf};

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    #[default]
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression, balanced level
    Deflate,
}

/// Where and how converted frames are saved
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Output file, overwritten with every converted frame
    pub path: PathBuf,
    pub compression: TiffCompression,
}

impl SnapshotConfig {
    pub fn builder(path: impl AsRef<Path>) -> SnapshotConfigBuilder {
        SnapshotConfigBuilder {
            path: path.as_ref().to_path_buf(),
            compression: None,
        }
    }
}

/// Builder for SnapshotConfig
pub struct SnapshotConfigBuilder {
    path: PathBuf,
    compression: Option<TiffCompression>,
}

impl SnapshotConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn build(self) -> SnapshotConfig {
        SnapshotConfig {
            path: self.path,
            compression: self.compression.unwrap_or_default(),
        }
    }
}
