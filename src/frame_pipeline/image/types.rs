//! Converted image types

use std::borrow::Cow;

use ndarray::Array3;

use crate::frame_pipeline::common::error::{ConversionError, Result};

/// Bit depth of every channel in a [`LegacyImage`].
pub const LEGACY_DEPTH_8U: u32 = 8;

/// Output representation requested from the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputShape {
    /// Generic `(height, width, channels)` array
    #[default]
    ArrayView,
    /// Fixed-layout image struct with an explicit row stride
    LegacyImage,
}

/// Channel order of the pixel data held by a converted image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Gray,
    Bgr,
}

impl ChannelOrder {
    pub fn channels(self) -> usize {
        match self {
            ChannelOrder::Gray => 1,
            ChannelOrder::Bgr => 3,
        }
    }
}

/// Image stored as a row-major `(height, width, channels)` array.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayImage {
    pixels: Array3<u8>,
    channel_order: ChannelOrder,
}

impl ArrayImage {
    pub fn from_vec(
        width: usize,
        height: usize,
        channel_order: ChannelOrder,
        data: Vec<u8>,
    ) -> Result<Self> {
        let pixels = Array3::from_shape_vec((height, width, channel_order.channels()), data)
            .map_err(|e| ConversionError::InvalidShape(e.to_string()))?;
        Ok(Self {
            pixels,
            channel_order,
        })
    }

    pub fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    pub fn into_pixels(self) -> Array3<u8> {
        self.pixels
    }
}

/// Fixed-layout image: width, height, channel count, depth and row stride
/// alongside a contiguous pixel block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyImage {
    pub width: usize,
    pub height: usize,
    pub n_channels: usize,
    /// Bits per channel
    pub depth: u32,
    /// Bytes per row
    pub width_step: usize,
    pub channel_order: ChannelOrder,
    pub image_data: Vec<u8>,
}

impl LegacyImage {
    pub fn from_vec(
        width: usize,
        height: usize,
        channel_order: ChannelOrder,
        image_data: Vec<u8>,
    ) -> Result<Self> {
        let n_channels = channel_order.channels();
        let width_step = width * n_channels;
        if image_data.len() != width_step * height {
            return Err(ConversionError::InvalidShape(format!(
                "{} bytes for a {}x{}x{} image",
                image_data.len(),
                width,
                height,
                n_channels
            )));
        }
        Ok(Self {
            width,
            height,
            n_channels,
            depth: LEGACY_DEPTH_8U,
            width_step,
            channel_order,
            image_data,
        })
    }

    /// Bytes of row `y`, or `None` past the last row.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width_step;
        self.image_data.get(start..start + self.width_step)
    }
}

/// Result of converting one raw frame
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertedImage {
    Array(ArrayImage),
    Legacy(LegacyImage),
}

impl ConvertedImage {
    pub fn width(&self) -> usize {
        match self {
            ConvertedImage::Array(img) => img.pixels.dim().1,
            ConvertedImage::Legacy(img) => img.width,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            ConvertedImage::Array(img) => img.pixels.dim().0,
            ConvertedImage::Legacy(img) => img.height,
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            ConvertedImage::Array(img) => img.pixels.dim().2,
            ConvertedImage::Legacy(img) => img.n_channels,
        }
    }

    pub fn channel_order(&self) -> ChannelOrder {
        match self {
            ConvertedImage::Array(img) => img.channel_order,
            ConvertedImage::Legacy(img) => img.channel_order,
        }
    }

    pub fn shape(&self) -> OutputShape {
        match self {
            ConvertedImage::Array(_) => OutputShape::ArrayView,
            ConvertedImage::Legacy(_) => OutputShape::LegacyImage,
        }
    }

    /// Pixel bytes in row-major, interleaved order.
    pub fn bytes(&self) -> Cow<'_, [u8]> {
        match self {
            ConvertedImage::Array(img) => match img.pixels.as_slice() {
                Some(slice) => Cow::Borrowed(slice),
                None => Cow::Owned(img.pixels.iter().copied().collect()),
            },
            ConvertedImage::Legacy(img) => Cow::Borrowed(&img.image_data),
        }
    }
}
