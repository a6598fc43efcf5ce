//! Common utilities module
//!
//! Shared error types used across the frame pipeline.

pub mod error;

pub use error::{AcquisitionError, ConversionError, Result};
