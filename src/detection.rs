use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb};

/// One tracked object on one frame, as reported by the upstream tracker.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Detection {
    #[serde(rename = "id")]
    pub track_id: u32,
    pub bbox: BBox<Ltrb>,
}

impl Detection {
    #[inline]
    pub fn new(track_id: u32, bbox: BBox<Ltrb>) -> Self {
        Self { track_id, bbox }
    }

    /// Pixel center of the bbox as `(x, y)`
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        let c = self.bbox.as_xywh();
        (c.cx(), c.cy())
    }

    #[inline]
    pub fn iou(&self, target: &BBox<Ltrb>) -> f32 {
        self.bbox.iou(target)
    }
}
