//! Deterministic test-pattern camera.
//!
//! Stands in for a vendor driver when no hardware is attached: mono frames
//! carry a diagonal ramp, RGB frames a horizontal red ramp, a vertical green
//! ramp and a blue level that follows the frame counter.

use std::time::Duration;

use crate::frame_pipeline::common::error::AcquisitionError;
use crate::frame_pipeline::raw::{FrameInfo, PixelEncoding};

use super::source::{DeviceInfo, FrameSource};

/// Device error code reported when grabbing before `start`.
const ERR_CALL_ORDER: u32 = 0x8000_0003;

pub struct SyntheticSource {
    width: u32,
    height: u32,
    encoding: PixelEncoding,
    frame_limit: Option<u32>,
    frames_sent: u32,
    grabbing: bool,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32, encoding: PixelEncoding) -> Self {
        Self {
            width,
            height,
            encoding,
            frame_limit: None,
            frames_sent: 0,
            grabbing: false,
        }
    }

    /// Reports a timeout once `limit` frames have been delivered.
    pub fn with_frame_limit(mut self, limit: u32) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * self.encoding.bytes_per_pixel()
    }

    fn fill(&self, buf: &mut [u8], frame_num: u32) {
        let width = self.width as usize;
        let height = self.height as usize;
        let bpp = self.encoding.bytes_per_pixel();
        if width == 0 || height == 0 {
            return;
        }
        for (y, row) in buf.chunks_exact_mut(width * bpp).take(height).enumerate() {
            for (x, pixel) in row.chunks_exact_mut(bpp).enumerate() {
                match self.encoding {
                    PixelEncoding::Mono8 => {
                        pixel[0] = ((x + y + frame_num as usize) % 256) as u8;
                    }
                    PixelEncoding::Rgb8Packed => {
                        pixel[0] = (x * 255 / width.max(1)) as u8;
                        pixel[1] = (y * 255 / height.max(1)) as u8;
                        pixel[2] = (frame_num % 256) as u8;
                    }
                }
            }
        }
    }
}

impl FrameSource for SyntheticSource {
    fn device_info(&self) -> DeviceInfo {
        DeviceInfo::GigE {
            current_ip: u32::from_be_bytes([192, 168, 1, 64]),
            user_defined_name: "synthetic".to_string(),
        }
    }

    fn payload_size(&self) -> Result<usize, AcquisitionError> {
        Ok(self.frame_len())
    }

    fn start(&mut self) -> Result<(), AcquisitionError> {
        self.grabbing = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AcquisitionError> {
        self.grabbing = false;
        Ok(())
    }

    fn grab_frame(
        &mut self,
        buf: &mut [u8],
        timeout: Duration,
    ) -> Result<FrameInfo, AcquisitionError> {
        if !self.grabbing {
            return Err(AcquisitionError::Device {
                code: ERR_CALL_ORDER,
                message: "grab requested before start".to_string(),
            });
        }
        if self.frame_limit.is_some_and(|limit| self.frames_sent >= limit) {
            return Err(AcquisitionError::Timeout(timeout));
        }

        let frame_len = self.frame_len();
        if buf.len() < frame_len {
            return Err(AcquisitionError::BufferTooSmall {
                needed: frame_len,
                available: buf.len(),
            });
        }

        let frame_num = self.frames_sent;
        self.fill(buf, frame_num);
        self.frames_sent += 1;

        Ok(FrameInfo {
            frame_num,
            ..FrameInfo::new(self.width, self.height, self.encoding)
        })
    }
}
