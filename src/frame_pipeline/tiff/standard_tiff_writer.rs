use std::io::Write;

use tiff::encoder::{colortype, compression::DeflateLevel, Compression, TiffEncoder};
use tracing::debug;

use crate::frame_pipeline::common::error::{ConversionError, Result};
use crate::frame_pipeline::image::{ChannelOrder, ConvertedImage};
use crate::frame_pipeline::raw::swap_red_blue;
use crate::frame_pipeline::tiff::types::{SnapshotConfig, TiffCompression};
use crate::frame_pipeline::tiff::writer::FrameWriter;

pub struct StandardTiffWriter;

impl FrameWriter for StandardTiffWriter {
    fn write_frame(
        &self,
        image: &ConvertedImage,
        output: &mut dyn Write,
        config: &SnapshotConfig,
    ) -> Result<()> {
        let width = image.width();
        let height = image.height();
        debug!("Encoding TIFF snapshot: {}x{}x{}", width, height, image.channels());

        let compression = match config.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::Deflate => Compression::Deflate(DeflateLevel::Balanced),
        };

        let mut buffer = Vec::new();
        let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?
            .with_compression(compression);

        match image.channel_order() {
            ChannelOrder::Gray => encoder
                .write_image::<colortype::Gray8>(width as u32, height as u32, &image.bytes()),
            ChannelOrder::Bgr => {
                // TIFF stores RGB; undo the display-order swap on a copy
                let mut rgb = image.bytes().into_owned();
                swap_red_blue(&mut rgb, width, height);
                encoder.write_image::<colortype::RGB8>(width as u32, height as u32, &rgb)
            }
        }
        .map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_pipeline::image::{ArrayImage, LegacyImage};
    use tiff::decoder::{Decoder, DecodingResult};

    fn decode(bytes: Vec<u8>) -> (u32, u32, Vec<u8>) {
        let mut decoder = Decoder::new(std::io::Cursor::new(bytes)).unwrap();
        let (width, height) = decoder.dimensions().unwrap();
        match decoder.read_image().unwrap() {
            DecodingResult::U8(data) => (width, height, data),
            _ => panic!("expected 8-bit data"),
        }
    }

    #[test]
    fn test_gray_snapshot() {
        let data: Vec<u8> = (0..12).collect();
        let image = ConvertedImage::Array(
            ArrayImage::from_vec(4, 3, ChannelOrder::Gray, data.clone()).unwrap(),
        );
        let config = SnapshotConfig::builder("unused.tiff").build();

        let mut output = Vec::new();
        StandardTiffWriter.write_frame(&image, &mut output, &config).unwrap();

        assert_eq!(decode(output), (4, 3, data));
    }

    #[test]
    fn test_bgr_snapshot_is_stored_as_rgb() {
        let bgr = vec![3, 2, 1, 30, 20, 10];
        let image = ConvertedImage::Legacy(
            LegacyImage::from_vec(2, 1, ChannelOrder::Bgr, bgr).unwrap(),
        );
        let config = SnapshotConfig::builder("unused.tiff")
            .compression(TiffCompression::Lzw)
            .build();

        let mut output = Vec::new();
        StandardTiffWriter.write_frame(&image, &mut output, &config).unwrap();

        assert_eq!(decode(output), (2, 1, vec![1, 2, 3, 10, 20, 30]));
    }
}
