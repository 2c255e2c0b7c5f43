//! Centered sliding-window statistics.
//!
//! A window covering rows `[s, s + len - 1]` is assigned to row `s + len / 2`.
//! Rows without a complete window come back as `None`: the first `len / 2`
//! and the last `(len - 1) / 2`.

use crate::Float;
use std::collections::VecDeque;

/// Fixed-length window with running sums, O(1) per push.
///
/// Sums are kept relative to the first value seen since the window was last
/// empty, which keeps the variance well conditioned for large pixel offsets.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    len: usize,
    values: VecDeque<T>,
    count: T,
    shift: T,
    sum: T,
    sum_sq: T,
}

impl<T: Float> RollingWindow<T> {
    pub fn new(len: usize) -> Self {
        let len = len.max(1);

        Self {
            len,
            values: VecDeque::new(),
            count: T::zero(),
            shift: T::zero(),
            sum: T::zero(),
            sum_sq: T::zero(),
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.count = T::zero();
        self.sum = T::zero();
        self.sum_sq = T::zero();
    }

    pub fn push(&mut self, value: T) {
        if self.values.is_empty() {
            self.shift = value;
        }

        if self.is_full() {
            if let Some(old) = self.values.pop_front() {
                let d = old - self.shift;
                self.sum = self.sum - d;
                self.sum_sq = self.sum_sq - d * d;
                self.count = self.count - T::one();
            }
        }

        let d = value - self.shift;
        self.sum = self.sum + d;
        self.sum_sq = self.sum_sq + d * d;
        self.count = self.count + T::one();
        self.values.push_back(value);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.values.len() == self.len
    }

    /// Arithmetic mean, once the window is full.
    pub fn mean(&self) -> Option<T> {
        if !self.is_full() {
            return None;
        }

        Some(self.shift + self.sum / self.count)
    }

    /// Sample standard deviation (`n - 1` denominator), once the window is full.
    pub fn std(&self) -> Option<T> {
        if !self.is_full() || self.len < 2 {
            return None;
        }

        let var = (self.sum_sq - self.sum * self.sum / self.count) / (self.count - T::one());

        Some(var.max(T::zero()).sqrt())
    }
}

pub fn centered_mean<T: Float>(values: &[T], len: usize) -> Vec<Option<T>> {
    centered(values, len, RollingWindow::mean)
}

pub fn centered_std<T: Float>(values: &[T], len: usize) -> Vec<Option<T>> {
    centered(values, len, RollingWindow::std)
}

fn centered<T, S>(values: &[T], len: usize, stat: S) -> Vec<Option<T>>
where
    T: Float,
    S: Fn(&RollingWindow<T>) -> Option<T>,
{
    let mut out = vec![None; values.len()];
    let len = len.max(1);
    if len > values.len() {
        return out;
    }

    let mut window = RollingWindow::new(len);

    for (i, &value) in values.iter().enumerate() {
        window.push(value);

        if window.is_full() {
            out[i + 1 - len + len / 2] = stat(&window);
        }
    }

    out
}
