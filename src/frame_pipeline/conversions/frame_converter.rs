//! Raw frame to image conversion.
//!
//! Packed RGB frames are reordered to BGR in the caller's buffer before the
//! pixels are copied out, so the returned image never aliases the raw frame.

use tracing::{debug, instrument};

use crate::frame_pipeline::{
    common::error::{ConversionError, Result},
    conversions::{
        rotate::rotate_180,
        types::{ConverterConfig, Rotation},
    },
    image::{ArrayImage, ChannelOrder, ConvertedImage, LegacyImage, OutputShape},
    raw::{swap_red_blue, PixelEncoding, RawFrame},
};

#[derive(Debug, Clone, Default)]
pub struct FrameConverter {
    config: ConverterConfig,
}

impl FrameConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Converts one raw frame into an owned image of the requested shape.
    ///
    /// Validation happens before any byte of the buffer is modified: a
    /// missing buffer, an unknown pixel format, zero dimensions, a short
    /// buffer or a partial frame all leave the caller's data untouched.
    #[instrument(skip(self, frame), fields(
        width = frame.info.width,
        height = frame.info.height,
        pixel_type = frame.info.pixel_type,
    ))]
    pub fn convert(&self, frame: RawFrame<'_>, shape: OutputShape) -> Result<ConvertedImage> {
        let RawFrame { data, info } = frame;
        let data = data.ok_or(ConversionError::NullBuffer)?;
        let encoding = PixelEncoding::try_from(info.pixel_type)?;

        let width = info.width as usize;
        let height = info.height as usize;
        let expected = frame_size(width, height, encoding)?;
        if data.len() < expected {
            return Err(ConversionError::BufferTooSmall {
                expected,
                actual: data.len(),
            });
        }
        // the payload buffer is reused, so bytes past frame_len are stale
        if info.frame_len < expected {
            return Err(ConversionError::BufferTooSmall {
                expected,
                actual: info.frame_len,
            });
        }

        let pixels = &mut data[..expected];
        let channel_order = match encoding {
            PixelEncoding::Mono8 => ChannelOrder::Gray,
            PixelEncoding::Rgb8Packed => {
                swap_red_blue(pixels, width, height);
                ChannelOrder::Bgr
            }
        };

        let mut owned = pixels.to_vec();
        if self.config.rotation == Rotation::Rotate180 {
            rotate_180(&mut owned, encoding.channels());
        }

        debug!(?encoding, ?shape, bytes = expected, "Frame converted");

        match shape {
            OutputShape::ArrayView => Ok(ConvertedImage::Array(ArrayImage::from_vec(
                width,
                height,
                channel_order,
                owned,
            )?)),
            OutputShape::LegacyImage => Ok(ConvertedImage::Legacy(LegacyImage::from_vec(
                width,
                height,
                channel_order,
                owned,
            )?)),
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConverterConfig) {
        self.config = config;
    }
}

fn frame_size(width: usize, height: usize, encoding: PixelEncoding) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(ConversionError::InvalidDimensions(width, height));
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(encoding.bytes_per_pixel()))
        .ok_or(ConversionError::InvalidDimensions(width, height))
}
