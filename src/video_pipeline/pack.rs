//! Quantization and MSB-first bit packing for the target framebuffer.

pub mod packer;
pub mod types;

pub use packer::FramePacker;
pub use types::{
    DEFAULT_THRESHOLD, FRAME_BYTES, FRAME_HEIGHT, FRAME_STRIDE, FRAME_WIDTH, QuantMode,
};
