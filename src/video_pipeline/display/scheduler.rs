//! Double-buffered frame scheduler.

use std::sync::atomic::{Ordering, fence};
use std::thread;

use tracing::{info, trace, warn};

use crate::video_pipeline::common::error::{Result, VideoError};
use crate::video_pipeline::display::types::DisplayConfig;
use crate::video_pipeline::pack::packer::FramePacker;
use crate::video_pipeline::pack::types::FRAME_BYTES;
use crate::video_pipeline::pru::handle::Coprocessor;
use crate::video_pipeline::xwd::decoder::XwdImage;
use crate::video_pipeline::xwd::source::CaptureSource;

/// Streams packed frames into the co-processor's shared region.
///
/// Two frame buffers live contiguously at the start of the region. The one
/// whose address was last written to the command register is live; the
/// other is idle and safe to overwrite. Nothing comes back from the
/// hardware, so the interval must stay long enough that the consumer
/// finishes a refresh within one buffer rotation.
pub struct DisplayScheduler<C: Coprocessor> {
    pru: C,
    packer: FramePacker,
    config: DisplayConfig,
    next: usize,
}

impl<C: Coprocessor> DisplayScheduler<C> {
    /// Validates the shared region and clears both buffers.
    pub fn new(pru: C, config: DisplayConfig) -> Result<Self> {
        if pru.shared_len() < 2 * FRAME_BYTES {
            return Err(VideoError::Resource(format!(
                "shared region is {} bytes, double buffering needs {}",
                pru.shared_len(),
                2 * FRAME_BYTES
            )));
        }
        let mut scheduler = Self {
            packer: FramePacker::new(config.threshold),
            pru,
            config,
            next: 0,
        };
        scheduler.pru.shared_mut()[..2 * FRAME_BYTES].fill(0);
        Ok(scheduler)
    }

    pub fn packer(&self) -> &FramePacker {
        &self.packer
    }

    pub fn coprocessor(&self) -> &C {
        &self.pru
    }

    /// Packs `source` into the idle buffer and publishes its address.
    ///
    /// The fence orders every pixel store before the address reaches the
    /// command register, so the co-processor never observes a partially
    /// written frame. Returns the published address; published addresses
    /// strictly alternate between the two buffers.
    pub fn present(&mut self, source: &XwdImage<'_>) -> Result<u32> {
        let offset = self.next * FRAME_BYTES;
        let buffer = &mut self.pru.shared_mut()[offset..offset + FRAME_BYTES];
        self.packer.pack(source, buffer)?;

        fence(Ordering::Release);

        let address = self.pru.shared_base() + offset as u32;
        self.pru.write_command(address);
        self.next ^= 1;
        trace!(address = format_args!("{address:#010x}"), "Frame published");
        Ok(address)
    }

    /// Decodes and presents one frame from a raw capture buffer.
    ///
    /// A malformed capture skips the frame and leaves the previous publish
    /// live; one dropped frame beats stalling the output. Setup errors
    /// propagate as fatal.
    pub fn tick(&mut self, raw: &[u8]) -> Result<Option<u32>> {
        let source = match XwdImage::parse(raw) {
            Ok(source) => source,
            Err(VideoError::Format(reason)) => {
                warn!(%reason, "Skipping malformed frame");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        self.present(&source).map(Some)
    }

    /// Runs until the process is terminated.
    pub fn run(&mut self, capture: &CaptureSource) -> Result<()> {
        info!(
            interval_ms = self.config.frame_interval.as_millis() as u64,
            "Entering display loop"
        );
        loop {
            self.tick(capture.bytes())?;
            thread::sleep(self.config.frame_interval);
        }
    }
}
