//! Stream an X11 screen capture to a Mac 128/Plus/SE-compatible video
//! output driven by a BeagleBone PRU.

pub mod logger;
pub mod video_pipeline;
