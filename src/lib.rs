pub mod aggregator;
pub mod bbox;
pub mod calibration;
pub mod config;
pub mod detection;
pub mod error;
pub mod frame;
pub mod history;
pub mod job;
pub mod kinematics;
pub mod selector;
pub mod source;
pub mod trajectory;
pub mod window;

pub use config::Config;
pub use detection::Detection;
pub use error::{Error, ErrorKind, Failure};
pub use frame::Frame;
pub use job::{Job, TargetBox};
pub use source::{DetectionSource, IterSource};
pub use trajectory::{Trajectory, TrajectoryRow};

use aggregator::Aggregator;
use kinematics::KinematicsDeriver;
use log::info;
use std::fmt;

pub trait Float: num_traits::Float + fmt::Debug + 'static {}

impl<T> Float for T where T: num_traits::Float + fmt::Debug + 'static {}

/// Derives the motion of one user-selected object from a tracked detection stream.
///
/// Each call to [`MotionTracker::run`] is an independent job: the detection
/// stream is read once, the target track is picked on the reference frame and
/// its trajectory is smoothed into position, velocity and acceleration.
#[derive(Debug, Clone, Default)]
pub struct MotionTracker {
    config: Config,
}

impl MotionTracker {
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run<S: DetectionSource + ?Sized>(&self, source: &mut S, job: &Job) -> Result<Trajectory, Error> {
        job.validate()?;

        let reference_frame = job.reference_frame();
        let window = self.config.window_len(job.fps);

        info!(
            target: "pipeline",
            "starting job: reference frame {}, window {}, {} m/px",
            reference_frame,
            window,
            job.calibration
        );

        let mut aggregator = Aggregator::new(reference_frame, job.target_bbox());
        aggregator.consume(source)?;
        let (history, reference) = aggregator.finish();

        let (track_id, samples) = selector::select_track(
            reference,
            &history,
            reference_frame,
            self.config.match_threshold,
        )?;

        let rows = KinematicsDeriver::new(window, job.calibration).derive(track_id, samples)?;
        let trajectory = Trajectory::assemble(rows);

        info!(
            target: "pipeline",
            "track {}: {} rows over {:.2}s",
            track_id,
            trajectory.len(),
            trajectory.duration()
        );

        Ok(trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::BBox;
    use crate::source::MockDetectionSource;

    // 30 frames at 10 fps, track 7 moving 2 px per frame along x
    fn moving_object(frames: usize) -> Vec<Frame> {
        (0..frames)
            .map(|i| {
                let cx = 100.0 + 2.0 * i as f32;
                Frame::new(
                    i as f64 / 10.0,
                    vec![
                        Detection::new(3, BBox::ltrb(400.0, 300.0, 440.0, 340.0)),
                        Detection::new(7, BBox::ltrb(cx - 10.0, 40.0, cx + 10.0, 60.0)),
                    ],
                )
            })
            .collect()
    }

    fn job() -> Job {
        Job {
            fps: 10.0,
            reference_time: 0.0,
            target: TargetBox {
                x1: 90.0,
                y1: 40.0,
                x2: 110.0,
                y2: 60.0,
            },
            calibration: 0.01,
        }
    }

    #[test]
    fn end_to_end_constant_velocity() {
        let tracker = MotionTracker::default();
        let traj = tracker
            .run(&mut IterSource::new(moving_object(30)), &job())
            .unwrap();

        // window 10: rows 5..=25 of the raw track survive smoothing
        assert_eq!(traj.len(), 21);
        for col in [
            &traj.x, &traj.y, &traj.v, &traj.v_x, &traj.v_y, &traj.a, &traj.a_x, &traj.a_y,
            &traj.err_x, &traj.err_y, &traj.err_v,
        ] {
            assert_eq!(col.len(), traj.time.len());
        }
        assert!(traj.time.windows(2).all(|p| p[1] > p[0]));

        // full velocity windows that do not include the zero first row
        for row in traj.rows().skip(6).take(11) {
            assert!((row.v_x - 0.2).abs() < 1e-9, "{:?}", row);
            assert!((row.v - 0.2).abs() < 1e-9);
        }
        for row in traj.rows().skip(7).take(10) {
            assert!(row.a.abs() < 1e-6, "{:?}", row);
        }
        assert!(traj.rows().all(|r| (r.y - 0.5).abs() < 1e-12));
    }

    #[test]
    fn reference_frame_is_picked_by_time() {
        let mut frames = moving_object(30);
        // track 7 only becomes the overlapping object on frame 12
        for frame in frames.iter_mut().take(12) {
            frame.detections.retain(|d| d.track_id != 7);
        }

        let job = Job {
            reference_time: 1.2,
            target: TargetBox {
                x1: 114.0,
                y1: 40.0,
                x2: 134.0,
                y2: 60.0,
            },
            ..job()
        };
        let traj = MotionTracker::default()
            .run(&mut IterSource::new(frames), &job)
            .unwrap();

        // 18 raw samples of track 7, window 10
        assert_eq!(traj.len(), 9);
        assert!((traj.time[0] - 1.7).abs() < 1e-9);
    }

    #[test]
    fn empty_source_is_track_not_found() {
        let err = MotionTracker::default()
            .run(&mut IterSource::new(Vec::new()), &job())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TrackNotFound);
    }

    #[test]
    fn weak_overlap_is_rejected() {
        let job = Job {
            target: TargetBox {
                x1: 400.0,
                y1: 0.0,
                x2: 800.0,
                y2: 600.0,
            },
            ..job()
        };
        // best is track 3: 1600 / 240000
        let err = MotionTracker::default()
            .run(&mut IterSource::new(moving_object(30)), &job)
            .unwrap_err();

        assert!(matches!(err, Error::MatchTooWeak { track_id: 3, .. }));
    }

    #[test]
    fn short_track_fails() {
        let err = MotionTracker::default()
            .run(&mut IterSource::new(moving_object(8)), &job())
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TrackTooShort);
    }

    #[test]
    fn huge_fps_is_a_short_track_not_an_abort() {
        let job = Job { fps: 1.0e18, ..job() };
        assert!(job.validate().is_ok());

        let err = MotionTracker::default()
            .run(&mut IterSource::new(moving_object(30)), &job)
            .unwrap_err();

        assert!(matches!(err, Error::TrackTooShort { track_id: 7, samples: 30, .. }));
    }

    #[test]
    fn nan_timestamp_on_first_kept_row_is_skipped() {
        let mut frames = moving_object(30);
        frames[5].timestamp = f64::NAN;

        let traj = MotionTracker::default()
            .run(&mut IterSource::new(frames), &job())
            .unwrap();

        assert_eq!(traj.len(), 20);
        assert!(traj.time.iter().all(|t| t.is_finite()));
        assert!(traj.rows().all(|r| r.v.is_finite() && r.a.is_finite()));
        assert!(traj.time.windows(2).all(|p| p[1] > p[0]));
    }

    #[test]
    fn invalid_job_never_touches_source() {
        let mut source = MockDetectionSource::new();
        source.expect_next_frame().never();

        let job = Job { fps: -1.0, ..job() };
        let err = MotionTracker::default().run(&mut source, &job).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidJob);
    }

    #[test]
    fn source_failure_is_reported_once() {
        let mut source = MockDetectionSource::new();
        source
            .expect_next_frame()
            .times(1)
            .returning(|| Err(Error::SourceUnreadable("cannot open video".into())));

        let err = MotionTracker::default().run(&mut source, &job()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SourceUnreadable);
        assert_eq!(Failure::from(&err).message, "detection source unreadable: cannot open video");
    }

    #[test]
    fn rejects_invalid_config() {
        let config = Config {
            match_threshold: -0.5,
            ..Config::default()
        };

        assert!(MotionTracker::new(config).is_err());

        let config = Config {
            min_window: 8,
            ..Config::default()
        };
        let tracker = MotionTracker::new(config).unwrap();
        assert_eq!(tracker.config().min_window, 8);
        assert_eq!(tracker.config().window_len(5.0), 8);
    }
}
