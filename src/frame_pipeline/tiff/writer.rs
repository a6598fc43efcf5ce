use std::io::Write;

use crate::frame_pipeline::common::error::Result;
use crate::frame_pipeline::image::ConvertedImage;
use crate::frame_pipeline::tiff::types::SnapshotConfig;

pub trait FrameWriter {
    fn write_frame(
        &self,
        image: &ConvertedImage,
        output: &mut dyn Write,
        config: &SnapshotConfig,
    ) -> Result<()>;
}
