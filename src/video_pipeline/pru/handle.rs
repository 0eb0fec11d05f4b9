use std::path::Path;

use crate::video_pipeline::common::error::Result;

/// Direction of a GPIO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDirection {
    Input,
    Output,
}

/// Narrow capability handle onto the real-time video co-processor.
///
/// The co-processor owns the shared memory region and polls a command word
/// for the address of the frame it should scan out. Keeping the surface
/// this small lets tests substitute a recording fake for real hardware.
pub trait Coprocessor {
    /// Base address of the shared region as the co-processor sees it.
    fn shared_base(&self) -> u32;

    /// Size in bytes of the shared region.
    fn shared_len(&self) -> usize;

    /// The shared region, writable from this process.
    fn shared_mut(&mut self) -> &mut [u8];

    /// Stores `word` into the command register polled by the co-processor.
    fn write_command(&mut self, word: u32);

    /// Configures one GPIO pin and drives its initial value.
    fn configure_gpio(
        &mut self,
        bank: u32,
        pin: u32,
        direction: PinDirection,
        value: bool,
    ) -> Result<()>;

    /// Loads a program image and starts autonomous execution.
    fn run_program(&mut self, image: &Path) -> Result<()>;
}

/// GPIO pins driven high to enable the video output stage.
pub const DRIVE_PINS: [(u32, u32); 3] = [(0, 22), (0, 23), (0, 27)];

/// Brings up the video output: drives the enable pins high, then loads
/// and starts the timing program.
pub fn start_video<C: Coprocessor>(pru: &mut C, firmware: &Path) -> Result<()> {
    for (bank, pin) in DRIVE_PINS {
        pru.configure_gpio(bank, pin, PinDirection::Output, true)?;
    }
    pru.run_program(firmware)
}
