use serde_derive::{Deserialize, Serialize};

/// One retained frame of the derived motion, in meters and seconds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct TrajectoryRow {
    pub time: f64,
    pub x: f64,
    pub y: f64,
    pub v: f64,
    pub v_x: f64,
    pub v_y: f64,
    pub a: f64,
    pub a_x: f64,
    pub a_y: f64,
    pub err_x: f64,
    pub err_y: f64,
    pub err_v: f64,
}

/// Column-oriented motion of the selected object.
///
/// All columns have the same length and row `i` of every column describes the
/// same frame. `time` is strictly increasing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    pub time: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub v: Vec<f64>,
    pub v_x: Vec<f64>,
    pub v_y: Vec<f64>,
    pub a: Vec<f64>,
    pub a_x: Vec<f64>,
    pub a_y: Vec<f64>,
    pub err_x: Vec<f64>,
    pub err_y: Vec<f64>,
    pub err_v: Vec<f64>,
}

impl Trajectory {
    pub fn assemble(rows: Vec<TrajectoryRow>) -> Self {
        let n = rows.len();
        let mut traj = Trajectory {
            time: Vec::with_capacity(n),
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            v: Vec::with_capacity(n),
            v_x: Vec::with_capacity(n),
            v_y: Vec::with_capacity(n),
            a: Vec::with_capacity(n),
            a_x: Vec::with_capacity(n),
            a_y: Vec::with_capacity(n),
            err_x: Vec::with_capacity(n),
            err_y: Vec::with_capacity(n),
            err_v: Vec::with_capacity(n),
        };

        for row in rows {
            traj.time.push(row.time);
            traj.x.push(row.x);
            traj.y.push(row.y);
            traj.v.push(row.v);
            traj.v_x.push(row.v_x);
            traj.v_y.push(row.v_y);
            traj.a.push(row.a);
            traj.a_x.push(row.a_x);
            traj.a_y.push(row.a_y);
            traj.err_x.push(row.err_x);
            traj.err_y.push(row.err_y);
            traj.err_v.push(row.err_v);
        }

        traj
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn row(&self, idx: usize) -> Option<TrajectoryRow> {
        Some(TrajectoryRow {
            time: *self.time.get(idx)?,
            x: *self.x.get(idx)?,
            y: *self.y.get(idx)?,
            v: *self.v.get(idx)?,
            v_x: *self.v_x.get(idx)?,
            v_y: *self.v_y.get(idx)?,
            a: *self.a.get(idx)?,
            a_x: *self.a_x.get(idx)?,
            a_y: *self.a_y.get(idx)?,
            err_x: *self.err_x.get(idx)?,
            err_y: *self.err_y.get(idx)?,
            err_v: *self.err_v.get(idx)?,
        })
    }

    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = TrajectoryRow> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }

    /// Seconds between the first and last retained frame
    pub fn duration(&self) -> f64 {
        match (self.time.first(), self.time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    pub fn max_speed(&self) -> Option<f64> {
        self.v.iter().copied().reduce(f64::max)
    }
}
