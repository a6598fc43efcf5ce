#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use crate::frame_pipeline::acquisition::{
        AcquisitionConfig, AcquisitionLoop, DeviceInfo, FrameSink, FrameSource, StopReason,
        SyntheticSource,
    };
    use crate::frame_pipeline::common::error::{AcquisitionError, ConversionError};
    use crate::frame_pipeline::image::{ChannelOrder, ConvertedImage, OutputShape};
    use crate::frame_pipeline::raw::{FrameInfo, PixelEncoding};
    use crate::frame_pipeline::tiff::{SnapshotConfig, TiffCompression};

    struct ScriptedFrame {
        info: FrameInfo,
        data: Vec<u8>,
    }

    fn mono_frame(width: u32, height: u32, value: u8) -> ScriptedFrame {
        ScriptedFrame {
            info: FrameInfo::new(width, height, PixelEncoding::Mono8),
            data: vec![value; (width * height) as usize],
        }
    }

    fn rgb_frame(width: u32, height: u32, pixel: [u8; 3]) -> ScriptedFrame {
        ScriptedFrame {
            info: FrameInfo::new(width, height, PixelEncoding::Rgb8Packed),
            data: pixel.repeat((width * height) as usize),
        }
    }

    struct MockSource {
        frames: VecDeque<ScriptedFrame>,
        payload_size: usize,
        fail_start: bool,
        started: bool,
        stopped: bool,
    }

    impl MockSource {
        fn new(frames: Vec<ScriptedFrame>, payload_size: usize) -> Self {
            Self {
                frames: frames.into(),
                payload_size,
                fail_start: false,
                started: false,
                stopped: false,
            }
        }
    }

    impl FrameSource for MockSource {
        fn device_info(&self) -> DeviceInfo {
            DeviceInfo::Usb {
                user_defined_name: "mock".to_string(),
                serial_number: "00000001".to_string(),
                device_number: 0,
            }
        }

        fn payload_size(&self) -> Result<usize, AcquisitionError> {
            Ok(self.payload_size)
        }

        fn start(&mut self) -> Result<(), AcquisitionError> {
            if self.fail_start {
                return Err(AcquisitionError::Device {
                    code: 0x8000_0000,
                    message: "mock start failure".to_string(),
                });
            }
            self.started = true;
            Ok(())
        }

        fn stop(&mut self) -> Result<(), AcquisitionError> {
            self.stopped = true;
            Ok(())
        }

        fn grab_frame(
            &mut self,
            buf: &mut [u8],
            timeout: Duration,
        ) -> Result<FrameInfo, AcquisitionError> {
            let frame = self
                .frames
                .pop_front()
                .ok_or(AcquisitionError::Timeout(timeout))?;
            if buf.len() < frame.data.len() {
                return Err(AcquisitionError::BufferTooSmall {
                    needed: frame.data.len(),
                    available: buf.len(),
                });
            }
            buf[..frame.data.len()].copy_from_slice(&frame.data);
            Ok(frame.info)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        keys: VecDeque<Option<char>>,
        fail: bool,
        shown: Vec<ConvertedImage>,
    }

    impl FrameSink for RecordingSink {
        fn show(&mut self, image: &ConvertedImage) -> Result<Option<char>, AcquisitionError> {
            if self.fail {
                return Err(AcquisitionError::Display("window closed".to_string()));
            }
            self.shown.push(image.clone());
            Ok(self.keys.pop_front().flatten())
        }
    }

    #[test]
    fn test_quit_key_stops_loop() {
        let frames = vec![mono_frame(4, 4, 1), mono_frame(4, 4, 2), mono_frame(4, 4, 3)];
        let mut source = MockSource::new(frames, 16);
        let mut sink = RecordingSink {
            keys: VecDeque::from([None, Some('q')]),
            ..Default::default()
        };

        let stats = AcquisitionLoop::new(AcquisitionConfig::default())
            .run(&mut source, &mut sink)
            .unwrap();

        assert_eq!(stats.stop_reason, StopReason::QuitKey);
        assert_eq!(stats.frames_grabbed, 2);
        assert_eq!(stats.frames_converted, 2);
        assert_eq!(sink.shown.len(), 2);
        assert_eq!(source.frames.len(), 1);
        assert!(source.started && source.stopped);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let frames = vec![mono_frame(2, 2, 1), mono_frame(2, 2, 2)];
        let mut source = MockSource::new(frames, 4);
        let mut sink = RecordingSink {
            keys: VecDeque::from([Some('x'), Some('Q')]),
            ..Default::default()
        };

        let stats = AcquisitionLoop::new(AcquisitionConfig::default())
            .run(&mut source, &mut sink)
            .unwrap();

        assert_eq!(sink.shown.len(), 2);
        assert_eq!(
            stats.stop_reason,
            StopReason::NoData(AcquisitionError::Timeout(Duration::from_millis(1000)))
        );
    }

    #[test]
    fn test_no_data_ends_loop() {
        let mut source = MockSource::new(vec![mono_frame(2, 2, 9)], 4);
        let mut sink = RecordingSink::default();
        let config = AcquisitionConfig::builder()
            .grab_timeout(Duration::from_millis(50))
            .build();

        let stats = AcquisitionLoop::new(config).run(&mut source, &mut sink).unwrap();

        assert_eq!(
            stats.stop_reason,
            StopReason::NoData(AcquisitionError::Timeout(Duration::from_millis(50)))
        );
        assert_eq!(stats.frames_grabbed, 1);
        assert_eq!(stats.timings.get_step("grab").unwrap().count, 2);
        assert!(source.stopped);
    }

    #[test]
    fn test_conversion_failure_skips_frame() {
        let mut bad = mono_frame(2, 2, 0);
        bad.info.pixel_type = 255;
        let frames = vec![mono_frame(2, 2, 1), bad, mono_frame(2, 2, 3)];
        let mut source = MockSource::new(frames, 4);
        let mut sink = RecordingSink::default();

        let stats = AcquisitionLoop::new(AcquisitionConfig::default())
            .run(&mut source, &mut sink)
            .unwrap();

        assert_eq!(stats.frames_grabbed, 3);
        assert_eq!(stats.frames_converted, 2);
        assert_eq!(stats.frames_skipped, 1);
        assert_eq!(sink.shown.len(), 2);
        assert_eq!(sink.shown[1].bytes().as_ref(), &[3u8, 3, 3, 3]);
    }

    #[test]
    fn test_frame_limit() {
        let frames = (0..5).map(|i| mono_frame(2, 2, i)).collect();
        let mut source = MockSource::new(frames, 4);
        let mut sink = RecordingSink::default();
        let config = AcquisitionConfig::builder().max_frames(Some(3)).build();

        let stats = AcquisitionLoop::new(config).run(&mut source, &mut sink).unwrap();

        assert_eq!(stats.stop_reason, StopReason::FrameLimit);
        assert_eq!(stats.frames_grabbed, 3);
        assert_eq!(source.frames.len(), 2);
    }

    #[test]
    fn test_zero_frame_limit_grabs_nothing() {
        let mut source = MockSource::new(vec![mono_frame(2, 2, 1)], 4);
        let mut sink = RecordingSink::default();
        let config = AcquisitionConfig::builder().max_frames(Some(0)).build();

        let stats = AcquisitionLoop::new(config).run(&mut source, &mut sink).unwrap();

        assert_eq!(stats.stop_reason, StopReason::FrameLimit);
        assert_eq!(stats.frames_grabbed, 0);
        assert!(sink.shown.is_empty());
        assert_eq!(source.frames.len(), 1);
        assert!(source.started && source.stopped);
    }

    #[test]
    fn test_partial_frame_is_skipped() {
        // the partial frame only rewrites the first 4 bytes of the reused buffer
        let partial = ScriptedFrame {
            info: FrameInfo {
                frame_len: 4,
                ..FrameInfo::new(4, 4, PixelEncoding::Mono8)
            },
            data: vec![1, 2, 3, 4],
        };
        let frames = vec![mono_frame(4, 4, 0xAA), partial, mono_frame(4, 4, 5)];
        let mut source = MockSource::new(frames, 16);
        let mut sink = RecordingSink::default();

        let stats = AcquisitionLoop::new(AcquisitionConfig::default())
            .run(&mut source, &mut sink)
            .unwrap();

        assert_eq!(stats.frames_grabbed, 3);
        assert_eq!(stats.frames_skipped, 1);
        assert_eq!(sink.shown.len(), 2);
        assert!(sink.shown[0].bytes().iter().all(|&b| b == 0xAA));
        assert!(sink.shown[1].bytes().iter().all(|&b| b == 5));
    }

    #[test]
    fn test_sink_failure_stops_source() {
        let mut source = MockSource::new(vec![mono_frame(2, 2, 1)], 4);
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };

        let stats = AcquisitionLoop::new(AcquisitionConfig::default())
            .run(&mut source, &mut sink)
            .unwrap();

        assert!(matches!(stats.stop_reason, StopReason::SinkClosed(AcquisitionError::Display(_))));
        assert_eq!(stats.frames_converted, 1);
        assert!(source.stopped);
    }

    #[test]
    fn test_configured_payload_size_overrides_source() {
        // source reports a buffer too small for its own frames
        let mut source = MockSource::new(vec![rgb_frame(2, 2, [1, 2, 3])], 4);
        let mut sink = RecordingSink::default();
        let config = AcquisitionConfig::builder()
            .payload_size(Some(12))
            .output_shape(OutputShape::LegacyImage)
            .max_frames(Some(1))
            .build();

        let stats = AcquisitionLoop::new(config).run(&mut source, &mut sink).unwrap();

        assert_eq!(stats.stop_reason, StopReason::FrameLimit);
        let image = &sink.shown[0];
        assert_eq!(image.shape(), OutputShape::LegacyImage);
        assert_eq!(image.channel_order(), ChannelOrder::Bgr);
        assert_eq!(image.bytes().as_ref(), [3u8, 2, 1].repeat(4).as_slice());
    }

    #[test]
    fn test_zero_payload_is_rejected() {
        let mut source = MockSource::new(vec![mono_frame(2, 2, 1)], 0);
        let mut sink = RecordingSink::default();

        let result = AcquisitionLoop::new(AcquisitionConfig::default()).run(&mut source, &mut sink);

        assert!(matches!(
            result,
            Err(ConversionError::Acquisition(AcquisitionError::ZeroPayload))
        ));
        assert!(!source.started);
    }

    #[test]
    fn test_start_failure_is_returned() {
        let mut source = MockSource::new(vec![mono_frame(2, 2, 1)], 4);
        source.fail_start = true;
        let mut sink = RecordingSink::default();

        let result = AcquisitionLoop::new(AcquisitionConfig::default()).run(&mut source, &mut sink);

        assert!(matches!(
            result,
            Err(ConversionError::Acquisition(AcquisitionError::Device { code: 0x8000_0000, .. }))
        ));
        assert!(sink.shown.is_empty());
    }

    #[test]
    fn test_snapshot_written_each_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.tiff");
        let frames = vec![rgb_frame(3, 2, [10, 20, 30]), rgb_frame(3, 2, [40, 50, 60])];
        let mut source = MockSource::new(frames, 18);
        let mut sink = RecordingSink::default();
        let config = AcquisitionConfig::builder()
            .snapshot(Some(
                SnapshotConfig::builder(&path)
                    .compression(TiffCompression::Deflate)
                    .build(),
            ))
            .build();

        let stats = AcquisitionLoop::new(config).run(&mut source, &mut sink).unwrap();
        assert_eq!(stats.snapshots_written, 2);

        let file = std::fs::File::open(&path).unwrap();
        let mut decoder = tiff::decoder::Decoder::new(file).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (3, 2));
        match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U8(data) => {
                // last frame wins, stored in RGB order
                assert_eq!(data, [40u8, 50, 60].repeat(6));
            }
            _ => panic!("expected 8-bit data"),
        }
    }

    #[test]
    fn test_snapshot_failure_does_not_stop_loop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("snapshot.tiff");
        let mut source = MockSource::new(vec![mono_frame(2, 2, 1), mono_frame(2, 2, 2)], 4);
        let mut sink = RecordingSink::default();
        let config = AcquisitionConfig::builder()
            .snapshot(Some(SnapshotConfig::builder(&path).build()))
            .build();

        let stats = AcquisitionLoop::new(config).run(&mut source, &mut sink).unwrap();

        assert_eq!(stats.snapshots_written, 0);
        assert_eq!(sink.shown.len(), 2);
    }

    #[test]
    fn test_synthetic_source_end_to_end() {
        let mut source = SyntheticSource::new(8, 6, PixelEncoding::Rgb8Packed).with_frame_limit(4);
        let mut sink = RecordingSink::default();

        let stats = AcquisitionLoop::new(AcquisitionConfig::default())
            .run(&mut source, &mut sink)
            .unwrap();

        assert_eq!(stats.frames_converted, 4);
        assert!(matches!(stats.stop_reason, StopReason::NoData(AcquisitionError::Timeout(_))));
        // blue channel of the sensor carries the frame counter; after the
        // swap it is the first byte of every pixel
        for (frame_num, image) in sink.shown.iter().enumerate() {
            assert_eq!((image.width(), image.height(), image.channels()), (8, 6, 3));
            assert_eq!(image.bytes()[0], frame_num as u8);
        }
    }

    #[test]
    fn test_synthetic_source_requires_start() {
        let mut source = SyntheticSource::new(2, 2, PixelEncoding::Mono8);
        let mut buf = vec![0u8; 4];

        let result = source.grab_frame(&mut buf, Duration::from_millis(10));

        assert!(matches!(result, Err(AcquisitionError::Device { .. })));
    }

    #[test]
    fn test_device_info_display() {
        let gige = DeviceInfo::GigE {
            current_ip: 0xC0A8_0140,
            user_defined_name: "line-cam".to_string(),
        };
        assert_eq!(gige.to_string(), "GigE 192.168.1.64 \"line-cam\"");

        let usb = DeviceInfo::Usb {
            user_defined_name: "bench".to_string(),
            serial_number: "DA1234".to_string(),
            device_number: 2,
        };
        assert_eq!(usb.to_string(), "USB3 \"bench\" serial DA1234 device 2");
    }
}
