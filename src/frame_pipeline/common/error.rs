use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Frame buffer is null")]
    NullBuffer,

    #[error("Unsupported pixel format: 0x{0:08x}")]
    UnsupportedFormat(u32),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Frame buffer too small: expected {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("Failed to build image array: {0}")]
    InvalidShape(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Acquisition error: {0}")]
    Acquisition(#[from] AcquisitionError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Failures reported by a frame source or a display sink.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionError {
    #[error("No data within {0:?}")]
    Timeout(Duration),

    #[error("Device error [0x{code:x}]: {message}")]
    Device { code: u32, message: String },

    #[error("Grab buffer too small: frame needs {needed} bytes, buffer holds {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Device reported a zero payload size")]
    ZeroPayload,

    #[error("Display failed: {0}")]
    Display(String),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
