//! Raw frame module
//!
//! Sensor-side frame description and the in-place channel reordering applied
//! to packed color buffers.

mod swap;
pub mod types;

pub use swap::swap_red_blue;
pub use types::{FrameInfo, PixelEncoding, RawFrame, PIXEL_TYPE_MONO8, PIXEL_TYPE_RGB8_PACKED};
