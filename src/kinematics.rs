use log::{debug, warn};
use nalgebra as na;

use crate::error::Error;
use crate::history::RawSample;
use crate::trajectory::TrajectoryRow;
use crate::window;

/// Smoothed, calibrated position of one retained frame.
#[derive(Debug, Clone, Copy)]
struct Smoothed {
    time: f64,
    pos: na::Point2<f64>,
    err: na::Vector2<f64>,
}

/// Turns a raw pixel track into smoothed position, velocity and acceleration.
#[derive(Debug, Clone, Copy)]
pub struct KinematicsDeriver {
    window: usize,
    calibration: f64,
}

impl KinematicsDeriver {
    /// `window` is the smoothing length in frames, `calibration` is meters per pixel.
    pub fn new(window: usize, calibration: f64) -> Self {
        Self {
            window: window.max(1),
            calibration,
        }
    }

    pub fn derive(&self, track_id: u32, samples: &[RawSample]) -> Result<Vec<TrajectoryRow>, Error> {
        let too_short = |samples| Error::TrackTooShort {
            track_id,
            samples,
            window: self.window,
        };

        let smoothed = self.smooth_positions(samples);
        if smoothed.is_empty() {
            return Err(too_short(samples.len()));
        }

        let rows = drop_non_increasing(smoothed);
        if rows.is_empty() {
            return Err(too_short(0));
        }

        debug!(
            target: "kinematics",
            "track {}: {} raw samples, {} rows after smoothing and dt filter (window {})",
            track_id,
            samples.len(),
            rows.len(),
            self.window
        );

        let mut dts = Vec::with_capacity(rows.len());
        let mut vel = Vec::with_capacity(rows.len());
        dts.push(None);
        vel.push(na::Vector2::zeros());

        for pair in rows.windows(2) {
            let dt = pair[1].time - pair[0].time;
            dts.push(Some(dt));
            vel.push((pair[1].pos - pair[0].pos) / dt);
        }

        let speed: Vec<f64> = vel.iter().map(|v| v.norm()).collect();
        let vx: Vec<f64> = vel.iter().map(|v| v.x).collect();
        let vy: Vec<f64> = vel.iter().map(|v| v.y).collect();

        let smooth_speed = window::centered_mean(&speed, self.window);
        let smooth_vel: Vec<Option<na::Vector2<f64>>> = window::centered_mean(&vx, self.window)
            .into_iter()
            .zip(window::centered_mean(&vy, self.window))
            .map(|(x, y)| Some(na::Vector2::new(x?, y?)))
            .collect();
        let err_v = window::centered_std(&speed, self.window);

        let accel = |i: usize| -> Option<na::Vector2<f64>> {
            let prev = smooth_vel[i.checked_sub(1)?]?;
            Some((smooth_vel[i]? - prev) / dts[i]?)
        };

        let out = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let v = smooth_vel[i].unwrap_or_else(na::Vector2::zeros);
                let a = accel(i).unwrap_or_else(na::Vector2::zeros);

                TrajectoryRow {
                    time: row.time,
                    x: row.pos.x,
                    y: row.pos.y,
                    v: smooth_speed[i].unwrap_or(0.0),
                    v_x: v.x,
                    v_y: v.y,
                    a: a.norm(),
                    a_x: a.x,
                    a_y: a.y,
                    err_x: row.err.x,
                    err_y: row.err.y,
                    err_v: err_v[i].unwrap_or(0.0),
                }
            })
            .collect();

        Ok(out)
    }

    /// Centered mean of the pixel centers, scaled to meters. Rows without a full
    /// window are dropped.
    fn smooth_positions(&self, samples: &[RawSample]) -> Vec<Smoothed> {
        let xs: Vec<f64> = samples.iter().map(|s| s.x_px).collect();
        let ys: Vec<f64> = samples.iter().map(|s| s.y_px).collect();

        let mean_x = window::centered_mean(&xs, self.window);
        let mean_y = window::centered_mean(&ys, self.window);
        let std_x = window::centered_std(&xs, self.window);
        let std_y = window::centered_std(&ys, self.window);

        samples
            .iter()
            .enumerate()
            .filter_map(|(i, s)| {
                let pos = na::Vector2::new(mean_x[i]?, mean_y[i]?);
                let err = na::Vector2::new(std_x[i].unwrap_or(0.0), std_y[i].unwrap_or(0.0));

                Some(Smoothed {
                    time: s.time,
                    pos: (pos * self.calibration).into(),
                    err: err * self.calibration,
                })
            })
            .collect()
    }
}

/// Keeps only rows with a finite time strictly later than the last kept row.
fn drop_non_increasing(rows: Vec<Smoothed>) -> Vec<Smoothed> {
    let mut kept: Vec<Smoothed> = Vec::with_capacity(rows.len());

    for row in rows {
        if !row.time.is_finite() {
            warn!(target: "kinematics", "dropping sample with time {}", row.time);
            continue;
        }

        if let Some(last) = kept.last() {
            let dt = row.time - last.time;

            if !(dt > 0.0) {
                warn!(target: "kinematics", "dropping sample at {:.4}s, dt {:.4}", row.time, dt);
                continue;
            }
        }

        kept.push(row);
    }

    kept
}
