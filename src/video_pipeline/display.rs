//! Double-buffered publishing of packed frames to the co-processor.

pub mod scheduler;
pub mod types;


pub use scheduler::DisplayScheduler;
pub use types::{DisplayConfig, DisplayConfigBuilder};
