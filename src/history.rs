use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::circular_queue::CircularQueue;

/// Smoothed track state of one frame, on whole pixels
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub position: na::Point2<i32>,
    pub radius: i32,
}

impl Sample {
    #[inline]
    pub fn new(x: i32, y: i32, radius: i32) -> Self {
        Self {
            position: na::Point2::new(x, y),
            radius,
        }
    }
}

/// Position and radius trails of the last `capacity` frames, newest at index 0.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    positions: CircularQueue<na::Point2<i32>>,
    radii: CircularQueue<i32>,
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: CircularQueue::with_capacity(capacity),
            radii: CircularQueue::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.positions.push(sample.position);
        self.radii.push(sample.radius);
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.radii.clear();
    }

    #[inline]
    pub fn positions(&self) -> &CircularQueue<na::Point2<i32>> {
        &self.positions
    }

    #[inline]
    pub fn radii(&self) -> &CircularQueue<i32> {
        &self.radii
    }

    #[inline]
    pub fn latest(&self) -> Option<Sample> {
        Some(Sample {
            position: *self.positions.top()?,
            radius: *self.radii.top()?,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.positions.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_is_never_exceeded() {
        let mut history = HistoryBuffer::new(4);

        for i in 0..10 {
            history.push(Sample::new(i, -i, i * 2));
            assert!(history.len() <= 4);
            assert_eq!(history.positions().len(), history.radii().len());
        }

        assert_eq!(history.latest(), Some(Sample::new(9, -9, 18)));
        // oldest surviving sample is the 4th most recent one
        assert_eq!(history.positions().get(3), Some(&na::Point2::new(6, -6)));
        assert_eq!(history.radii().get(3), Some(&12));
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryBuffer::new(4);
        history.push(Sample::new(1, 1, 1));
        history.clear();

        assert!(history.is_empty());
        assert!(history.radii().is_empty());
        assert_eq!(history.latest(), None);
        assert_eq!(history.capacity(), 4);
    }
}
