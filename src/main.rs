use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use frame_convert_rs::frame_pipeline::{
    AcquisitionConfig, AcquisitionError, AcquisitionLoop, ConvertedImage, FrameSink,
    OutputShape, PixelEncoding, Rotation, SnapshotConfig, StopReason, SyntheticSource,
    TiffCompression,
};
use frame_convert_rs::logger;

use tracing::{debug, info, warn};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
enum EncodingArg {
    Mono8,
    Rgb8,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
enum ShapeArg {
    /// (height, width, channels) array
    Array,
    /// Fixed struct with row stride
    Legacy,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
enum CompressionArg {
    None,
    Lzw,
    Deflate,
}

/// Grab frames from a test-pattern camera, convert them and report each one.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Frame width in pixels
    #[arg(long, env = "FRAME_WIDTH", default_value = "640")]
    width: u32,

    /// Frame height in pixels
    #[arg(long, env = "FRAME_HEIGHT", default_value = "480")]
    height: u32,

    /// Sensor pixel encoding
    #[arg(long, env = "ENCODING", default_value = "rgb8", value_enum)]
    encoding: EncodingArg,

    /// Output image representation
    #[arg(long, env = "SHAPE", default_value = "array", value_enum)]
    shape: ShapeArg,

    /// Number of frames the camera delivers before running dry
    #[arg(long, env = "FRAMES", default_value = "30")]
    frames: u32,

    /// Grab timeout in milliseconds
    #[arg(long, env = "TIMEOUT_MS", default_value = "1000")]
    timeout_ms: u64,

    /// Rotate every converted frame by 180 degrees
    #[arg(long, env = "ROTATE_180")]
    rotate_180: bool,

    /// Save each converted frame to this TIFF file
    #[arg(long, env = "SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Snapshot compression
    #[arg(long, env = "COMPRESSION", default_value = "none", value_enum)]
    compression: CompressionArg,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Reports frame statistics instead of drawing a window.
struct LogSink;

impl FrameSink for LogSink {
    fn show(&mut self, image: &ConvertedImage) -> Result<Option<char>, AcquisitionError> {
        let bytes = image.bytes();
        let mean = bytes.iter().map(|&b| b as u64).sum::<u64>() as f64 / bytes.len().max(1) as f64;
        debug!(
            width = image.width(),
            height = image.height(),
            channels = image.channels(),
            mean,
            "Frame shown"
        );
        Ok(None)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    info!("Starting frame_convert...");

    let encoding = match args.encoding {
        EncodingArg::Mono8 => PixelEncoding::Mono8,
        EncodingArg::Rgb8 => PixelEncoding::Rgb8Packed,
    };
    let shape = match args.shape {
        ShapeArg::Array => OutputShape::ArrayView,
        ShapeArg::Legacy => OutputShape::LegacyImage,
    };
    let compression = match args.compression {
        CompressionArg::None => TiffCompression::None,
        CompressionArg::Lzw => TiffCompression::Lzw,
        CompressionArg::Deflate => TiffCompression::Deflate,
    };
    let snapshot = args
        .snapshot
        .as_ref()
        .map(|path| SnapshotConfig::builder(path).compression(compression).build());

    let config = AcquisitionConfig::builder()
        .output_shape(shape)
        .grab_timeout(Duration::from_millis(args.timeout_ms))
        .rotation(if args.rotate_180 {
            Rotation::Rotate180
        } else {
            Rotation::None
        })
        .snapshot(snapshot)
        .build();

    let mut source =
        SyntheticSource::new(args.width, args.height, encoding).with_frame_limit(args.frames);
    let acquisition = AcquisitionLoop::new(config);

    let stats = acquisition.run(&mut source, &mut LogSink)?;

    match stats.stop_reason {
        StopReason::NoData(_) | StopReason::QuitKey | StopReason::FrameLimit => {
            info!("Converted {} of {} frames", stats.frames_converted, stats.frames_grabbed)
        }
        StopReason::SinkClosed(e) => warn!("Display closed early: {}", e),
    }

    Ok(())
}
