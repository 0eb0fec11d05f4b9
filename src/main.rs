use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use xwd2mac::logger;
use xwd2mac::video_pipeline::{
    CaptureSource, DisplayConfig, DisplayScheduler, UioPruss, start_video,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Stream an XWD screen capture to a Mac-compatible video output"
)]
struct Args {
    /// Path to the live XWD dump (e.g. the Xvfb framebuffer file)
    capture: PathBuf,

    /// Quantization threshold for captures deeper than 1 bit
    #[arg(short, long, default_value_t = 0x80)]
    threshold: u8,

    /// Pause between published frames, in milliseconds
    #[arg(short, long, default_value_t = 30)]
    interval_ms: u64,

    /// PRU program image generating the video timing
    #[arg(short, long, default_value = "./macvideo.bin")]
    firmware: PathBuf,

    /// uio_pruss device index
    #[arg(long, default_value_t = 0)]
    pru: u32,
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    info!("Starting xwd2mac...");

    let mut pru = UioPruss::init(args.pru).context("co-processor initialization failed")?;
    start_video(&mut pru, &args.firmware)
        .with_context(|| format!("video bring-up with {} failed", args.firmware.display()))?;

    let capture = CaptureSource::open(&args.capture)
        .with_context(|| format!("opening capture {} failed", args.capture.display()))?;

    let image = capture.decode().context("initial capture decode failed")?;
    let header = image.header();
    info!(
        name = %image.window_name(),
        width = header.pixmap_width,
        height = header.pixmap_height,
        depth = header.pixmap_depth,
        ncolors = header.ncolors,
        bytes_per_line = header.bytes_per_line,
        "Capture source ready"
    );

    let config = DisplayConfig::builder()
        .threshold(args.threshold)
        .frame_interval(Duration::from_millis(args.interval_ms))
        .build();

    let mut scheduler = DisplayScheduler::new(pru, config)?;
    scheduler.packer().check_bounds(&image)?;

    scheduler.run(&capture)?;
    Ok(())
}
