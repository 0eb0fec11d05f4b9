//! Target framebuffer geometry and quantization modes.

/// Width in pixels of the target display.
pub const FRAME_WIDTH: usize = 512;

/// Height in pixels of the target display.
pub const FRAME_HEIGHT: usize = 384;

/// Bytes per packed row; the width is exactly 64 groups of 8 pixels.
pub const FRAME_STRIDE: usize = FRAME_WIDTH / 8;

/// Total size in bytes of one packed frame.
pub const FRAME_BYTES: usize = FRAME_STRIDE * FRAME_HEIGHT;

/// Default quantization threshold.
pub const DEFAULT_THRESHOLD: u8 = 0x80;

/// How a stored sample becomes one display bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantMode {
    /// Samples are already 0/1 valued; use them directly.
    Bilevel,
    /// Intensity compare against a threshold, with sample value 1 reserved
    /// as the maximum-intensity sentinel.
    Threshold(u8),
}

impl QuantMode {
    /// Selects the mode for a dump's reported depth.
    pub fn for_depth(depth: u32, threshold: u8) -> Self {
        if depth <= 1 {
            QuantMode::Bilevel
        } else {
            QuantMode::Threshold(threshold)
        }
    }

    /// Quantizes one stored sample to a display bit.
    ///
    /// In threshold mode, sample 0 is dark and sample 1 is the color
    /// table's maximum-intensity sentinel, always lit. Every other sample
    /// is shifted down by one before the compare; the offset matches the
    /// dump's color-table encoding and is load-bearing for pixel fidelity.
    pub fn quantize(self, sample: u8) -> bool {
        match self {
            QuantMode::Bilevel => sample != 0,
            QuantMode::Threshold(threshold) => match sample {
                0 => false,
                1 => true,
                s => (s - 1) > threshold,
            },
        }
    }
}
