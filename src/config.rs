use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

/// Minimum IoU the reference match has to exceed.
pub const MATCH_IOU_THRESHOLD: f32 = 0.1;

/// Smoothing windows never get shorter than this many frames.
pub const MIN_SMOOTHING_WINDOW: usize = 5;

/// Pipeline tunables. Set by the embedding application, not per job.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub match_threshold: f32,
    pub min_window: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_threshold: MATCH_IOU_THRESHOLD,
            min_window: MIN_SMOOTHING_WINDOW,
        }
    }
}

impl Config {
    /// Smoothing window length for a video at `fps`: about one second of frames.
    pub fn window_len(&self, fps: f64) -> usize {
        let frames = if fps.is_finite() && fps > 0.0 {
            fps.round() as usize
        } else {
            0
        };

        frames.max(self.min_window)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..1.0).contains(&self.match_threshold) {
            return Err(Error::InvalidJob(format!(
                "match threshold {} outside [0, 1)",
                self.match_threshold
            )));
        }

        if self.min_window == 0 {
            return Err(Error::InvalidJob("smoothing window must be at least 1".into()));
        }

        Ok(())
    }
}
