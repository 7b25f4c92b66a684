use crate::history::HistoryBuffer;
use crate::track::TrackState;

/// Dead reckoning for frames without an accepted detection.
#[derive(Debug, Clone)]
pub struct CoastPredictor {
    pub max_coast_frames: u32,
}

impl CoastPredictor {
    pub fn new(max_coast_frames: u32) -> Self {
        Self { max_coast_frames }
    }

    /// Advances the state by its last velocity keeping radius and velocity.
    /// Returns `None` once `max_coast_frames` coasted frames are spent, the
    /// track is lost at that point.
    pub fn coast(&self, state: &TrackState) -> Option<TrackState> {
        if state.coast_frames >= self.max_coast_frames {
            return None;
        }

        let mut next = *state;
        next.coast_frames += 1;
        next.position.x += state.velocity.x as f32;
        next.position.y += state.velocity.y as f32;

        Some(next)
    }

    /// Coasts and records the dead-reckoned sample, so it takes part in the
    /// following velocity and growth estimates.
    pub fn apply(&self, state: &TrackState, history: &mut HistoryBuffer) -> Option<TrackState> {
        let next = self.coast(state)?;
        history.push(next.sample());

        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Measurement;
    use nalgebra as na;

    fn moving(vx: i32, vy: i32) -> TrackState {
        TrackState {
            velocity: na::Vector2::new(vx, vy),
            ..TrackState::acquire(Measurement::new(100.5, 200.0, 10.0))
        }
    }

    #[test]
    fn test_coast_advances_by_velocity() {
        let predictor = CoastPredictor::new(10);
        let next = predictor.coast(&moving(4, -2)).unwrap();

        assert_eq!(next.position, na::Point2::new(104.5, 198.0));
        assert_eq!(next.radius, 10.0);
        assert_eq!(next.velocity, na::Vector2::new(4, -2));
        assert_eq!(next.coast_frames, 1);
    }

    #[test]
    fn test_coast_is_bounded() {
        let predictor = CoastPredictor::new(3);
        let mut state = moving(1, 0);

        for i in 1..=3 {
            state = predictor.coast(&state).unwrap();
            assert_eq!(state.coast_frames, i);
        }

        assert_eq!(predictor.coast(&state), None);
    }

    #[test]
    fn test_zero_bound_never_coasts() {
        assert_eq!(CoastPredictor::new(0).coast(&moving(1, 1)), None);
    }

    #[test]
    fn test_apply_records_dead_reckoned_sample() {
        let predictor = CoastPredictor::new(10);
        let mut history = HistoryBuffer::new(8);

        let next = predictor.apply(&moving(3, 0), &mut history).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history.latest(), Some(next.sample()));
        assert_eq!(next.sample().position, na::Point2::new(103, 200));
    }
}
