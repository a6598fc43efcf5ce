//! Converted image module
//!
//! Output representations produced by the frame converter.

pub mod types;

pub use types::{ArrayImage, ChannelOrder, ConvertedImage, LegacyImage, OutputShape};
