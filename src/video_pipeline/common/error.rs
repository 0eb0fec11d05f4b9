use thiserror::Error;

#[derive(Error, Debug)]
pub enum VideoError {
    #[error("Malformed capture: {0}")]
    Format(String),

    #[error("Pixel ({x}, {y}) outside capture bounds {width}x{height}")]
    Bounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Capture {width}x{height} smaller than target {target_width}x{target_height}")]
    SourceTooSmall {
        width: usize,
        height: usize,
        target_width: usize,
        target_height: usize,
    },

    #[error("Resource unavailable: {0}")]
    Resource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VideoError>;
