use std::fmt;
use std::time::Duration;

use crate::frame_pipeline::common::error::AcquisitionError;
use crate::frame_pipeline::raw::FrameInfo;

/// Transport-level description of an opened camera
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceInfo {
    GigE {
        /// IPv4 address, most significant byte first
        current_ip: u32,
        user_defined_name: String,
    },
    Usb {
        user_defined_name: String,
        serial_number: String,
        device_number: u32,
    },
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceInfo::GigE {
                current_ip,
                user_defined_name,
            } => {
                let [a, b, c, d] = current_ip.to_be_bytes();
                write!(f, "GigE {a}.{b}.{c}.{d} \"{user_defined_name}\"")
            }
            DeviceInfo::Usb {
                user_defined_name,
                serial_number,
                device_number,
            } => write!(
                f,
                "USB3 \"{user_defined_name}\" serial {serial_number} device {device_number}"
            ),
        }
    }
}

/// An opened camera that fills caller-owned buffers with frames.
pub trait FrameSource {
    fn device_info(&self) -> DeviceInfo;

    /// Byte length of one full frame buffer.
    fn payload_size(&self) -> Result<usize, AcquisitionError>;

    fn start(&mut self) -> Result<(), AcquisitionError>;

    fn stop(&mut self) -> Result<(), AcquisitionError>;

    /// Waits at most `timeout` for the next frame and copies it into `buf`.
    ///
    /// Returns [`AcquisitionError::Timeout`] when no frame arrived in time.
    fn grab_frame(&mut self, buf: &mut [u8], timeout: Duration)
    -> Result<FrameInfo, AcquisitionError>;
}
