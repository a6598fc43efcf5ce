//! Frame conversion module
//!
//! Turns raw sensor frames into owned image objects.

mod frame_converter;
mod rotate;
pub mod types;


pub use frame_converter::FrameConverter;
pub use rotate::rotate_180;
pub use types::{ConverterConfig, Rotation};
