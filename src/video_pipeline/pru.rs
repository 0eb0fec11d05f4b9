//! Interface to the real-time video co-processor.

pub mod handle;
pub mod uio;

pub use handle::{Coprocessor, DRIVE_PINS, PinDirection, start_video};
pub use uio::UioPruss;
