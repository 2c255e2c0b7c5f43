#[cfg(test)]
use mockall::automock;

use crate::error::Error;
use crate::frame::Frame;

/// A frame-ordered stream of tracked detections.
///
/// Implementations wrap whatever decodes the video and runs the detection
/// model. Track ids must stay stable across frames for the same physical
/// object. Returning `Ok(None)` ends the stream; an `Err` aborts the job.
#[cfg_attr(test, automock)]
pub trait DetectionSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, Error>;
}

/// [`DetectionSource`] over frames that are already in memory.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    frames: I,
}

impl<I: Iterator<Item = Frame>> IterSource<I> {
    pub fn new<T: IntoIterator<IntoIter = I>>(frames: T) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }
}

impl<I: Iterator<Item = Frame>> DetectionSource for IterSource<I> {
    #[inline]
    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        Ok(self.frames.next())
    }
}
