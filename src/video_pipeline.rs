//! X11-to-Mac video pipeline.
//!
//! Decodes live XWD screen captures, quantizes them down to the target's
//! 512x384 1-bit framebuffer format, and schedules double-buffered
//! publishes into the shared memory of the video co-processor.

pub mod common;
pub mod display;
pub mod pack;
pub mod pru;
pub mod xwd;

pub use common::{Result, VideoError};

pub use xwd::{ByteOrder, CaptureSource, XwdHeader, XwdImage};

pub use pack::{
    DEFAULT_THRESHOLD, FRAME_BYTES, FRAME_HEIGHT, FRAME_STRIDE, FRAME_WIDTH, FramePacker,
    QuantMode,
};

pub use pru::{Coprocessor, DRIVE_PINS, PinDirection, UioPruss, start_video};

pub use display::{DisplayConfig, DisplayConfigBuilder, DisplayScheduler};
