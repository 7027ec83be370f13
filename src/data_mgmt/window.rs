use std::collections::VecDeque;

use super::models::SeriesPoint;

/// Bounded FIFO of chart samples
///
/// The window never holds more than `max_len` points; pushing onto a full window
/// evicts the oldest point.
#[derive(Clone, Debug)]
pub struct RollingWindow {
    max_len: usize,
    points: VecDeque<SeriesPoint>,
}

impl RollingWindow {
    pub fn new(max_len: usize) -> Self {
        let max_len = max_len.max(1);
        Self {
            max_len,
            points: VecDeque::with_capacity(max_len),
        }
    }

    pub fn push(&mut self, point: SeriesPoint) {
        self.points.push_back(point);
        while self.points.len() > self.max_len {
            self.points.pop_front();
        }
    }

    /// Replace the whole window, keeping only the last `max_len` of `points`
    pub fn replace(&mut self, points: impl IntoIterator<Item = SeriesPoint>) {
        self.points.clear();
        points.into_iter().for_each(|p| self.push(p));
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}
