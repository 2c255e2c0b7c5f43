use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb};
use crate::error::Error;

/// User's box around the target object, in pixels.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TargetBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl From<TargetBox> for BBox<Ltrb> {
    #[inline]
    fn from(b: TargetBox) -> Self {
        BBox::ltrb(b.x1, b.y1, b.x2, b.y2)
    }
}

/// Everything a single run needs besides the detection stream.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Job {
    pub fps: f64,

    /// Time of the frame the user drew `target` on, in seconds
    #[serde(alias = "selected_frame_time")]
    pub reference_time: f64,

    #[serde(alias = "detect_object")]
    pub target: TargetBox,

    /// Meters per pixel
    #[serde(alias = "pixel_size")]
    pub calibration: f64,
}

impl Job {
    #[inline]
    pub fn reference_frame(&self) -> usize {
        (self.reference_time * self.fps).round() as usize
    }

    #[inline]
    pub fn target_bbox(&self) -> BBox<Ltrb> {
        self.target.into()
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(Error::InvalidJob(format!("fps must be positive, got {}", self.fps)));
        }

        if !(self.reference_time.is_finite() && self.reference_time >= 0.0) {
            return Err(Error::InvalidJob(format!(
                "reference time must be non-negative, got {}",
                self.reference_time
            )));
        }

        if !(self.calibration.is_finite() && self.calibration > 0.0) {
            return Err(Error::InvalidJob(format!(
                "calibration must be positive, got {}",
                self.calibration
            )));
        }

        let target = self.target_bbox();
        if !target.is_finite() || target.width() <= 0.0 || target.height() <= 0.0 {
            return Err(Error::InvalidJob(format!("degenerate target box {:?}", self.target)));
        }

        Ok(())
    }
}
