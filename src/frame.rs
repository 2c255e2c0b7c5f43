use serde_derive::{Deserialize, Serialize};

use crate::detection::Detection;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub timestamp: f64, // in seconds
    pub detections: Vec<Detection>,
}

impl Frame {
    #[inline]
    pub fn new(timestamp: f64, detections: Vec<Detection>) -> Self {
        Self {
            timestamp,
            detections,
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter()
    }
}
