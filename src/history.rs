use std::collections::HashMap;

/// Pixel center of one track at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSample {
    pub time: f64,
    pub x_px: f64,
    pub y_px: f64,
}

/// Per-track samples in frame arrival order.
#[derive(Debug, Default)]
pub struct TrackHistory {
    tracks: HashMap<u32, Vec<RawSample>>,
}

impl TrackHistory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, track_id: u32, sample: RawSample) {
        self.tracks.entry(track_id).or_default().push(sample);
    }

    #[inline]
    pub fn get(&self, track_id: u32) -> Option<&[RawSample]> {
        self.tracks.get(&track_id).map(Vec::as_slice)
    }

    /// Number of distinct tracks seen
    #[inline]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
