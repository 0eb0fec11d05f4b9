use std::time::Duration;

use crate::video_pipeline::pack::types::DEFAULT_THRESHOLD;

/// Tuning for the display loop.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Quantization threshold for captures deeper than 1 bit.
    pub threshold: u8,
    /// Pause between publishes. Shorter improves motion fidelity at the
    /// cost of CPU and bus load.
    pub frame_interval: Duration,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            frame_interval: Duration::from_millis(30),
        }
    }
}

impl DisplayConfig {
    pub fn builder() -> DisplayConfigBuilder {
        DisplayConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct DisplayConfigBuilder {
    threshold: Option<u8>,
    frame_interval: Option<Duration>,
}

impl DisplayConfigBuilder {
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }

    pub fn build(self) -> DisplayConfig {
        let default = DisplayConfig::default();
        DisplayConfig {
            threshold: self.threshold.unwrap_or(default.threshold),
            frame_interval: self.frame_interval.unwrap_or(default.frame_interval),
        }
    }
}
