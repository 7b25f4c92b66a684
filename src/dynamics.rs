use nalgebra as na;
use serde_derive::Serialize;

use crate::history::HistoryBuffer;
use crate::math::{mean, to_f32};

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct DynamicsEstimate {
    /// Pixels per frame, truncated toward zero.
    pub velocity: na::Vector2<i32>,
    /// Mean radius of the newest window minus mean radius of the oldest one.
    pub growth_rate: f32,
}

impl DynamicsEstimate {
    #[inline]
    pub fn still() -> Self {
        Self {
            velocity: na::Vector2::zeros(),
            growth_rate: 0.0,
        }
    }
}

/// Finite-difference velocity and size trend over the smoothed history.
#[derive(Debug, Clone)]
pub struct DynamicsEstimator {
    pub window: usize,
}

impl DynamicsEstimator {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Returns a still estimate until the history holds `window` positions
    /// and `2 * window` radii.
    pub fn estimate(&self, history: &HistoryBuffer) -> DynamicsEstimate {
        let n = self.window;
        let positions = history.positions();
        let radii = history.radii();

        if n < 2 || positions.len() < n || radii.len() < n * 2 {
            return DynamicsEstimate::still();
        }

        // newest first, so each pair is (newer, older); f32 since a step
        // between clamped pixels can exceed the i32 range
        let steps: Vec<na::Vector2<f32>> = positions
            .iter()
            .zip(positions.iter().skip(1))
            .take(n - 1)
            .map(|(newer, older)| to_f32(newer) - to_f32(older))
            .collect();

        let dx = mean(steps.iter().map(|d| d.x)).unwrap_or(0.0);
        let dy = mean(steps.iter().map(|d| d.y)).unwrap_or(0.0);

        // windows are disjoint as long as radii.len() >= 2 * n
        let recent = mean(radii.iter().take(n).map(|&r| r as f32));
        let oldest = mean(radii.iter().rev().take(n).map(|&r| r as f32));

        DynamicsEstimate {
            velocity: na::Vector2::new(dx as i32, dy as i32),
            growth_rate: match (recent, oldest) {
                (Some(recent), Some(oldest)) => recent - oldest,
                _ => 0.0,
            },
        }
    }
}
