//! Camera frame conversion pipeline
//!
//! Raw sensor frames come in through a [`FrameSource`], are reordered and
//! copied into owned images by the [`FrameConverter`], and go out to a
//! [`FrameSink`]. Saving frames to TIFF is an optional side path.

pub mod acquisition;
pub mod common;
pub mod conversions;
pub mod image;
pub mod raw;
pub mod tiff;

pub use common::{AcquisitionError, ConversionError, Result};

pub use raw::{swap_red_blue, FrameInfo, PixelEncoding, RawFrame};

pub use image::{ArrayImage, ChannelOrder, ConvertedImage, LegacyImage, OutputShape};

pub use conversions::{ConverterConfig, FrameConverter, Rotation};

pub use tiff::{FrameWriter, SnapshotConfig, StandardTiffWriter, TiffCompression};

pub use acquisition::{
    AcquisitionConfig, AcquisitionLoop, DeviceInfo, FrameSink, FrameSource, LoopStats,
    StopReason, SyntheticSource,
};
