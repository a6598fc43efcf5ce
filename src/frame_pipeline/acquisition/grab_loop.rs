use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::frame_pipeline::{
    common::error::{AcquisitionError, ConversionError, Result},
    conversions::{ConverterConfig, FrameConverter},
    image::ConvertedImage,
    raw::RawFrame,
    tiff::{FrameWriter, SnapshotConfig, StandardTiffWriter},
};

use super::{
    sink::FrameSink,
    source::FrameSource,
    timing::{PipelineTimings, Timer},
    types::{AcquisitionConfig, LoopStats, StopReason},
};

pub struct AcquisitionLoop<W: FrameWriter> {
    converter: FrameConverter,
    writer: W,
    config: AcquisitionConfig,
}

impl AcquisitionLoop<StandardTiffWriter> {
    pub fn new(config: AcquisitionConfig) -> Self {
        Self::with_custom(StandardTiffWriter, config)
    }
}

impl<W: FrameWriter> AcquisitionLoop<W> {
    pub fn with_custom(writer: W, config: AcquisitionConfig) -> Self {
        let converter = FrameConverter::new(
            ConverterConfig::builder()
                .rotation(config.rotation)
                .build(),
        );
        Self {
            converter,
            writer,
            config,
        }
    }

    /// Grabs, converts and shows frames until a stop condition is hit.
    ///
    /// Frames that fail to convert are skipped. The source is stopped on
    /// every exit path once it has been started.
    #[instrument(skip_all)]
    pub fn run<S, D>(&self, source: &mut S, sink: &mut D) -> Result<LoopStats>
    where
        S: FrameSource + ?Sized,
        D: FrameSink + ?Sized,
    {
        let device = source.device_info();
        info!(%device, "Opening acquisition");

        let payload_size = match self.config.payload_size {
            Some(size) => size,
            None => source.payload_size()?,
        };
        if payload_size == 0 {
            return Err(AcquisitionError::ZeroPayload.into());
        }
        let mut buffer = vec![0u8; payload_size];
        debug!(payload_size, "Allocated frame buffer");

        source.start()?;
        info!(shape = ?self.config.output_shape, "Grabbing started");

        let stats = self.grab_frames(source, sink, &mut buffer);
        if let Err(e) = source.stop() {
            warn!("Stop grabbing failed: {}", e);
        }

        stats.timings.log_summary();
        info!(
            grabbed = stats.frames_grabbed,
            converted = stats.frames_converted,
            skipped = stats.frames_skipped,
            reason = ?stats.stop_reason,
            "Grabbing stopped"
        );
        Ok(stats)
    }

    fn grab_frames<S, D>(&self, source: &mut S, sink: &mut D, buffer: &mut [u8]) -> LoopStats
    where
        S: FrameSource + ?Sized,
        D: FrameSink + ?Sized,
    {
        let mut timings = PipelineTimings::new();
        let mut frames_grabbed = 0u64;
        let mut frames_converted = 0u64;
        let mut frames_skipped = 0u64;
        let mut snapshots_written = 0u64;

        let stop_reason = loop {
            if self.config.max_frames.is_some_and(|max| frames_grabbed >= max) {
                break StopReason::FrameLimit;
            }

            let timer = Timer::start("grab");
            let grabbed = source.grab_frame(buffer, self.config.grab_timeout);
            timings.record(timer);

            let info = match grabbed {
                Ok(info) => info,
                Err(e) => {
                    warn!("No data: {}", e);
                    break StopReason::NoData(e);
                }
            };
            frames_grabbed += 1;
            debug!(
                width = info.width,
                height = info.height,
                frame_num = info.frame_num,
                "Got one frame"
            );

            let timer = Timer::start("convert");
            let converted = self
                .converter
                .convert(RawFrame::new(&mut buffer[..], info), self.config.output_shape);
            timings.record(timer);

            match converted {
                Ok(image) => {
                    frames_converted += 1;

                    if let Some(snapshot) = &self.config.snapshot {
                        let timer = Timer::start("snapshot");
                        match self.save_snapshot(&image, snapshot) {
                            Ok(()) => snapshots_written += 1,
                            Err(e) => warn!("Failed to save snapshot: {}", e),
                        }
                        timings.record(timer);
                    }

                    let timer = Timer::start("display");
                    let shown = sink.show(&image);
                    timings.record(timer);

                    match shown {
                        Ok(Some(key)) if key == self.config.quit_key => break StopReason::QuitKey,
                        Ok(key) => {
                            if let Some(key) = key {
                                debug!(%key, "Ignoring key");
                            }
                        }
                        Err(e) => {
                            warn!("Display failed: {}", e);
                            break StopReason::SinkClosed(e);
                        }
                    }
                }
                Err(e) => {
                    frames_skipped += 1;
                    warn!(frame_num = info.frame_num, "Skipping frame: {}", e);
                }
            }
        };

        LoopStats {
            frames_grabbed,
            frames_converted,
            frames_skipped,
            snapshots_written,
            stop_reason,
            timings,
        }
    }

    fn save_snapshot(&self, image: &ConvertedImage, snapshot: &SnapshotConfig) -> Result<()> {
        let path: &Path = &snapshot.path;
        let mut file = std::fs::File::create(path).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        self.writer.write_frame(image, &mut file, snapshot)
    }

    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }
}
