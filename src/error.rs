use serde_derive::{Deserialize, Serialize};
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("detection source unreadable: {0}")]
    SourceUnreadable(#[source] BoxError),

    #[error("no tracked objects on reference frame {frame}")]
    TrackNotFound { frame: usize },

    #[error("best match on reference frame is track {track_id} with IoU {iou:.3}, not above {threshold}")]
    MatchTooWeak {
        track_id: u32,
        iou: f32,
        threshold: f32,
    },

    #[error("selected track {track_id} has no recorded samples")]
    EmptyHistory { track_id: u32 },

    #[error("track {track_id} too short: {samples} samples left for smoothing window {window}")]
    TrackTooShort {
        track_id: u32,
        samples: usize,
        window: usize,
    },

    #[error("invalid job: {0}")]
    InvalidJob(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SourceUnreadable(_) => ErrorKind::SourceUnreadable,
            Error::TrackNotFound { .. } => ErrorKind::TrackNotFound,
            Error::MatchTooWeak { .. } => ErrorKind::MatchTooWeak,
            Error::EmptyHistory { .. } => ErrorKind::EmptyHistory,
            Error::TrackTooShort { .. } => ErrorKind::TrackTooShort,
            Error::InvalidJob(_) => ErrorKind::InvalidJob,
        }
    }
}

/// Machine-readable discriminant of an [`Error`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    SourceUnreadable,
    TrackNotFound,
    MatchTooWeak,
    EmptyHistory,
    TrackTooShort,
    InvalidJob,
}

impl ErrorKind {
    /// `true` when the failure points at a logic fault rather than bad input.
    #[inline]
    pub fn is_internal(self) -> bool {
        matches!(self, ErrorKind::EmptyHistory)
    }
}

/// Terminal failure of a job, as reported to the caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl<'a> From<&'a Error> for Failure {
    fn from(err: &'a Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
