use nalgebra as na;

use crate::config::TrackerConfig;
use crate::detection::Measurement;
use crate::history::HistoryBuffer;
use crate::math::lerp;
use crate::track::TrackState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StabilizerStep {
    /// No prior state, measurement adopted unchanged.
    Acquired,
    /// Measurement outside the deadzone, blended in.
    Smoothed,
    /// Measurement inside the deadzone, state untouched.
    Held,
}

/// Deadzone gated exponential moving average over position and radius.
#[derive(Debug, Clone)]
pub struct Stabilizer {
    pub smooth_factor: f32,
    pub deadzone: f32,
}

impl Stabilizer {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            smooth_factor: config.smooth_factor,
            deadzone: config.deadzone_pixels,
        }
    }

    pub fn stabilize(
        &self,
        state: Option<&TrackState>,
        m: Measurement,
    ) -> (TrackState, StabilizerStep) {
        let prev = match state {
            Some(prev) => prev,
            None => return (TrackState::acquire(m), StabilizerStep::Acquired),
        };

        let mut next = TrackState {
            coast_frames: 0,
            ..*prev
        };

        let raw = na::Point2::new(m.x, m.y);
        if na::distance(&raw, &prev.position) <= self.deadzone {
            return (next, StabilizerStep::Held);
        }

        let a = self.smooth_factor;
        next.position.x = lerp(prev.position.x, m.x, a);
        next.position.y = lerp(prev.position.y, m.y, a);
        next.radius = lerp(prev.radius, m.r, a);

        (next, StabilizerStep::Smoothed)
    }

    /// Stabilizes and records the resulting whole-pixel sample.
    pub fn apply(
        &self,
        state: Option<&TrackState>,
        m: Measurement,
        history: &mut HistoryBuffer,
    ) -> (TrackState, StabilizerStep) {
        let (next, step) = self.stabilize(state, m);
        history.push(next.sample());

        (next, step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stabilizer() -> Stabilizer {
        Stabilizer::new(&TrackerConfig::default())
    }

    #[test]
    fn test_first_acquisition_is_exact() {
        let (state, step) = stabilizer().stabilize(None, Measurement::new(100.0, 80.0, 12.0));

        assert_eq!(step, StabilizerStep::Acquired);
        assert_eq!(state.position, na::Point2::new(100.0, 80.0));
        assert_eq!(state.radius, 12.0);
    }

    #[test]
    fn test_deadzone_holds_state() {
        let s = stabilizer();
        let (state, _) = s.stabilize(None, Measurement::new(100.0, 100.0, 10.0));
        let coasted = TrackState {
            coast_frames: 4,
            ..state
        };

        // sqrt(2^2 + 2^2) < 3
        let (next, step) = s.stabilize(Some(&coasted), Measurement::new(102.0, 102.0, 30.0));

        assert_eq!(step, StabilizerStep::Held);
        assert_eq!(next.position, state.position);
        assert_eq!(next.radius, state.radius);
        assert_eq!(next.coast_frames, 0);
    }

    #[test]
    fn test_deadzone_boundary_is_inclusive() {
        let s = stabilizer();
        let (state, _) = s.stabilize(None, Measurement::new(100.0, 100.0, 10.0));
        let (_, step) = s.stabilize(Some(&state), Measurement::new(103.0, 100.0, 10.0));

        assert_eq!(step, StabilizerStep::Held);
    }

    #[test]
    fn test_ema_step() {
        let s = stabilizer();
        let (state, _) = s.stabilize(None, Measurement::new(100.0, 100.0, 10.0));
        let (next, step) = s.stabilize(Some(&state), Measurement::new(150.0, 100.0, 20.0));

        assert_eq!(step, StabilizerStep::Smoothed);
        assert_relative_eq!(next.position.x, 107.5, epsilon = 1e-4);
        assert_relative_eq!(next.position.y, 100.0);
        assert_relative_eq!(next.radius, 11.5, epsilon = 1e-4);
    }

    #[test]
    fn test_velocity_is_kept() {
        let s = stabilizer();
        let state = TrackState {
            velocity: na::Vector2::new(3, -1),
            ..TrackState::acquire(Measurement::new(0.0, 0.0, 5.0))
        };
        let (next, _) = s.stabilize(Some(&state), Measurement::new(50.0, 0.0, 5.0));

        assert_eq!(next.velocity, na::Vector2::new(3, -1));
    }

    #[test]
    fn test_apply_records_sample() {
        let s = stabilizer();
        let mut history = HistoryBuffer::new(8);

        let (state, _) = s.apply(None, Measurement::new(100.0, 100.0, 10.0), &mut history);
        let (state, _) = s.apply(Some(&state), Measurement::new(150.0, 100.0, 10.0), &mut history);

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest(), Some(state.sample()));
        assert_eq!(history.positions().get(0), Some(&na::Point2::new(107, 100)));
        assert_eq!(history.positions().get(1), Some(&na::Point2::new(100, 100)));
    }
}
