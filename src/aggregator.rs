use log::{debug, info};

use crate::bbox::{BBox, Ltrb};
use crate::error::Error;
use crate::frame::Frame;
use crate::history::{RawSample, TrackHistory};
use crate::source::DetectionSource;

/// Best-overlapping detection on the reference frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceMatch {
    pub track_id: u32,
    pub iou: f32,
}

/// Single forward pass over the detection stream.
///
/// Records every track's pixel centers and, on the reference frame, compares
/// every detection against the user's target box.
#[derive(Debug)]
pub struct Aggregator {
    reference_frame: usize,
    target: BBox<Ltrb>,
    frame_index: usize,
    history: TrackHistory,
    best: Option<ReferenceMatch>,
}

impl Aggregator {
    pub fn new(reference_frame: usize, target: BBox<Ltrb>) -> Self {
        Self {
            reference_frame,
            target,
            frame_index: 0,
            history: TrackHistory::new(),
            best: None,
        }
    }

    pub fn push_frame(&mut self, frame: &Frame) {
        let is_reference = self.frame_index == self.reference_frame;

        for det in frame.iter() {
            let (cx, cy) = det.center();

            self.history.push(
                det.track_id,
                RawSample {
                    time: frame.timestamp,
                    x_px: cx as f64,
                    y_px: cy as f64,
                },
            );

            if is_reference {
                let iou = det.iou(&self.target);
                debug!(target: "aggregator", "reference candidate track {} iou {:.3}", det.track_id, iou);

                // first seen wins ties
                if self.best.map_or(true, |best| iou > best.iou) {
                    self.best = Some(ReferenceMatch {
                        track_id: det.track_id,
                        iou,
                    });
                }
            }
        }

        self.frame_index += 1;
    }

    /// Drains `source` to the end. Source errors abort without a partial result.
    pub fn consume<S: DetectionSource + ?Sized>(&mut self, source: &mut S) -> Result<(), Error> {
        while let Some(frame) = source.next_frame()? {
            self.push_frame(&frame);
        }

        info!(
            target: "aggregator",
            "consumed {} frames, {} tracks",
            self.frame_index,
            self.history.len()
        );

        Ok(())
    }

    #[inline]
    pub fn frames_seen(&self) -> usize {
        self.frame_index
    }

    #[inline]
    pub fn reference_match(&self) -> Option<ReferenceMatch> {
        self.best
    }

    pub fn finish(self) -> (TrackHistory, Option<ReferenceMatch>) {
        (self.history, self.best)
    }
}
