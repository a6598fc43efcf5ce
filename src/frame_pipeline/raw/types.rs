//! Raw frame data types

use crate::frame_pipeline::common::error::ConversionError;

/// GigE Vision pixel format code for 8-bit monochrome.
pub const PIXEL_TYPE_MONO8: u32 = 0x0108_0001;

/// GigE Vision pixel format code for 8-bit packed RGB.
pub const PIXEL_TYPE_RGB8_PACKED: u32 = 0x0218_0014;

/// In-memory channel layout of a sensor frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelEncoding {
    /// One byte per pixel, single channel
    Mono8,
    /// Three bytes per pixel in sensor order (red, green, blue)
    Rgb8Packed,
}

impl PixelEncoding {
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelEncoding::Mono8 => 1,
            PixelEncoding::Rgb8Packed => 3,
        }
    }

    pub fn channels(self) -> usize {
        self.bytes_per_pixel()
    }

    /// Wire code reported by the device for this encoding.
    pub fn pixel_type(self) -> u32 {
        match self {
            PixelEncoding::Mono8 => PIXEL_TYPE_MONO8,
            PixelEncoding::Rgb8Packed => PIXEL_TYPE_RGB8_PACKED,
        }
    }
}

impl TryFrom<u32> for PixelEncoding {
    type Error = ConversionError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            PIXEL_TYPE_MONO8 => Ok(PixelEncoding::Mono8),
            PIXEL_TYPE_RGB8_PACKED => Ok(PixelEncoding::Rgb8Packed),
            other => Err(ConversionError::UnsupportedFormat(other)),
        }
    }
}

/// Per-frame metadata reported by the acquisition device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInfo {
    /// Width of the frame in pixels
    pub width: u32,
    /// Height of the frame in pixels
    pub height: u32,
    /// Device pixel format code (see [`PixelEncoding`])
    pub pixel_type: u32,
    /// Frame counter as reported by the device
    pub frame_num: u32,
    /// Number of valid bytes the device wrote into the buffer
    pub frame_len: usize,
}

impl FrameInfo {
    pub fn new(width: u32, height: u32, encoding: PixelEncoding) -> Self {
        Self {
            width,
            height,
            pixel_type: encoding.pixel_type(),
            frame_num: 0,
            frame_len: width as usize * height as usize * encoding.bytes_per_pixel(),
        }
    }
}

/// A sensor frame borrowed from the acquisition caller for one conversion.
///
/// `data` is `None` when the caller has no buffer to hand over.
#[derive(Debug)]
pub struct RawFrame<'a> {
    pub data: Option<&'a mut [u8]>,
    pub info: FrameInfo,
}

impl<'a> RawFrame<'a> {
    pub fn new(data: &'a mut [u8], info: FrameInfo) -> Self {
        Self {
            data: Some(data),
            info,
        }
    }

    pub fn without_buffer(info: FrameInfo) -> Self {
        Self { data: None, info }
    }
}
