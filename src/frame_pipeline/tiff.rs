//! TIFF snapshot module
//!
//! Optional persistence of converted frames. Disabled unless a
//! [`SnapshotConfig`] is supplied.

mod standard_tiff_writer;
pub mod types;
mod writer;

pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{SnapshotConfig, SnapshotConfigBuilder, TiffCompression};
pub use writer::FrameWriter;
