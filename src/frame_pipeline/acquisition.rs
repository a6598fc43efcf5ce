//! Acquisition module
//!
//! Drives a frame source through the converter and hands each image to a
//! display sink until the user quits or the source runs dry.

mod grab_loop;
mod sink;
mod source;
mod synthetic;
mod timing;
pub mod types;

#[cfg(test)]
mod tests;

pub use grab_loop::AcquisitionLoop;
pub use sink::FrameSink;
pub use source::{DeviceInfo, FrameSource};
pub use synthetic::SyntheticSource;
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use types::{AcquisitionConfig, AcquisitionConfigBuilder, LoopStats, StopReason};
