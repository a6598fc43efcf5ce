//! Acquisition loop configuration and results

use std::time::Duration;

use crate::frame_pipeline::common::error::AcquisitionError;
use crate::frame_pipeline::conversions::Rotation;
use crate::frame_pipeline::image::OutputShape;
use crate::frame_pipeline::tiff::SnapshotConfig;

use super::timing::PipelineTimings;

/// Configuration for the grab loop
#[derive(Debug, Clone)]
pub struct AcquisitionConfig {
    /// Output representation handed to the sink
    pub output_shape: OutputShape,
    /// How long a single grab may wait for a frame
    pub grab_timeout: Duration,
    /// Frame buffer size; `None` asks the source
    pub payload_size: Option<usize>,
    /// Key that ends the loop when returned by the sink
    pub quit_key: char,
    /// Stop after this many grabbed frames
    pub max_frames: Option<u64>,
    pub rotation: Rotation,
    /// Save every converted frame; disabled when `None`
    pub snapshot: Option<SnapshotConfig>,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            output_shape: OutputShape::ArrayView,
            grab_timeout: Duration::from_millis(1000),
            payload_size: None,
            quit_key: 'q',
            max_frames: None,
            rotation: Rotation::None,
            snapshot: None,
        }
    }
}

impl AcquisitionConfig {
    pub fn builder() -> AcquisitionConfigBuilder {
        AcquisitionConfigBuilder::default()
    }
}

/// Builder for AcquisitionConfig
#[derive(Default)]
pub struct AcquisitionConfigBuilder {
    output_shape: Option<OutputShape>,
    grab_timeout: Option<Duration>,
    payload_size: Option<Option<usize>>,
    quit_key: Option<char>,
    max_frames: Option<Option<u64>>,
    rotation: Option<Rotation>,
    snapshot: Option<Option<SnapshotConfig>>,
}

impl AcquisitionConfigBuilder {
    pub fn output_shape(mut self, shape: OutputShape) -> Self {
        self.output_shape = Some(shape);
        self
    }

    pub fn grab_timeout(mut self, timeout: Duration) -> Self {
        self.grab_timeout = Some(timeout);
        self
    }

    pub fn payload_size(mut self, size: Option<usize>) -> Self {
        self.payload_size = Some(size);
        self
    }

    pub fn quit_key(mut self, key: char) -> Self {
        self.quit_key = Some(key);
        self
    }

    pub fn max_frames(mut self, max: Option<u64>) -> Self {
        self.max_frames = Some(max);
        self
    }

    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn snapshot(mut self, snapshot: Option<SnapshotConfig>) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn build(self) -> AcquisitionConfig {
        let default = AcquisitionConfig::default();
        AcquisitionConfig {
            output_shape: self.output_shape.unwrap_or(default.output_shape),
            grab_timeout: self.grab_timeout.unwrap_or(default.grab_timeout),
            payload_size: self.payload_size.unwrap_or(default.payload_size),
            quit_key: self.quit_key.unwrap_or(default.quit_key),
            max_frames: self.max_frames.unwrap_or(default.max_frames),
            rotation: self.rotation.unwrap_or(default.rotation),
            snapshot: self.snapshot.unwrap_or(default.snapshot),
        }
    }
}

/// Why the grab loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The sink returned the quit key
    QuitKey,
    /// The source produced no frame
    NoData(AcquisitionError),
    /// `max_frames` frames were grabbed
    FrameLimit,
    /// The sink failed to present a frame
    SinkClosed(AcquisitionError),
}

/// Counters collected over one run of the grab loop
#[derive(Debug)]
pub struct LoopStats {
    pub frames_grabbed: u64,
    pub frames_converted: u64,
    pub frames_skipped: u64,
    pub snapshots_written: u64,
    pub stop_reason: StopReason,
    pub timings: PipelineTimings,
}
