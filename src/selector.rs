use log::info;

use crate::aggregator::ReferenceMatch;
use crate::error::Error;
use crate::history::{RawSample, TrackHistory};

/// Picks the track the user drew a box around.
///
/// The reference match has to overlap the target box by more than
/// `threshold` IoU, and the chosen track must have recorded samples.
pub fn select_track<'a>(
    reference: Option<ReferenceMatch>,
    history: &'a TrackHistory,
    reference_frame: usize,
    threshold: f32,
) -> Result<(u32, &'a [RawSample]), Error> {
    let best = reference.ok_or(Error::TrackNotFound {
        frame: reference_frame,
    })?;

    if best.iou <= threshold {
        return Err(Error::MatchTooWeak {
            track_id: best.track_id,
            iou: best.iou,
            threshold,
        });
    }

    let samples = history
        .get(best.track_id)
        .filter(|samples| !samples.is_empty())
        .ok_or(Error::EmptyHistory {
            track_id: best.track_id,
        })?;

    info!(
        target: "selector",
        "selected track {} (iou {:.3}, {} samples)",
        best.track_id,
        best.iou,
        samples.len()
    );

    Ok((best.track_id, samples))
}
