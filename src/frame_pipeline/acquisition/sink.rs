use crate::frame_pipeline::common::error::AcquisitionError;
use crate::frame_pipeline::image::ConvertedImage;

/// Consumer of converted frames, typically a preview window.
pub trait FrameSink {
    /// Presents one image and returns the key pressed meanwhile, if any.
    fn show(&mut self, image: &ConvertedImage) -> Result<Option<char>, AcquisitionError>;
}
