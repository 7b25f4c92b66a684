use std::time::{Duration, Instant};

use nalgebra as na;
use tracing::{debug, info, trace};

use crate::config::TrackerConfig;
use crate::direction::DirectionLabeler;
use crate::dynamics::{DynamicsEstimate, DynamicsEstimator};
use crate::error::Error;
use crate::filter::DetectionFilter;
use crate::frame::Frame;
use crate::history::HistoryBuffer;
use crate::intercept::InterceptClassifier;
use crate::predictor::CoastPredictor;
use crate::stabilizer::{Stabilizer, StabilizerStep};
use crate::timing::{FrameObserver, FrameTimings};
use crate::track::{FrameOutcome, TrackReport, TrackState, TrackStatus};
use crate::Tracking;

/// Single target tracker. Owns the track state and its history, one
/// `update` call per video frame.
pub struct Tracker {
    config: TrackerConfig,
    filter: DetectionFilter,
    stabilizer: Stabilizer,
    estimator: DynamicsEstimator,
    predictor: CoastPredictor,
    classifier: InterceptClassifier,
    labeler: DirectionLabeler,
    state: Option<TrackState>,
    history: HistoryBuffer,
    timings: FrameTimings,
    observer: Option<Box<dyn FrameObserver + Send>>,
    frame_index: u64,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            filter: DetectionFilter::new(&config),
            stabilizer: Stabilizer::new(&config),
            estimator: DynamicsEstimator::new(config.velocity_calc_frames),
            predictor: CoastPredictor::new(config.max_coast_frames),
            classifier: InterceptClassifier::new(&config),
            labeler: DirectionLabeler::new(config.movement_threshold),
            state: None,
            history: HistoryBuffer::new(config.buffer_size),
            timings: FrameTimings::default(),
            observer: None,
            frame_index: 0,
            config,
        })
    }

    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: FrameObserver + Send + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> Option<&TrackState> {
        self.state.as_ref()
    }

    #[inline]
    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    #[inline]
    pub fn timings(&self) -> &FrameTimings {
        &self.timings
    }

    pub fn reset(&mut self) {
        self.state = None;
        self.history.clear();
    }

    pub fn update(&mut self, frame: &Frame) -> FrameOutcome {
        let started = Instant::now();
        let outcome = self.process(frame);

        let budget = self.config.frame_budget_us.map(Duration::from_micros);
        let timing = self
            .timings
            .record(self.frame_index, started.elapsed(), budget);

        if timing.over_budget {
            debug!(
                frame = timing.frame_index,
                elapsed_us = timing.elapsed.as_micros() as u64,
                "frame processing over budget"
            );
        }

        if let Some(observer) = self.observer.as_mut() {
            observer.on_frame(&timing);
        }

        self.frame_index += 1;

        outcome
    }

    fn process(&mut self, frame: &Frame) -> FrameOutcome {
        let measurement = self.filter.select(frame.iter());
        trace!(
            frame = self.frame_index,
            detections = frame.len(),
            accepted = measurement.is_some(),
            "filtered detections"
        );

        let (state, dynamics, status) = match (measurement, self.state) {
            (Some(m), prev) => {
                let (state, step) = self.stabilizer.apply(prev.as_ref(), m, &mut self.history);
                let dynamics = self.estimator.estimate(&self.history);

                if step == StabilizerStep::Acquired {
                    info!(x = m.x, y = m.y, r = m.r, "target acquired");
                }

                let status = match step {
                    StabilizerStep::Acquired => TrackStatus::Acquired,
                    _ => TrackStatus::Tracking,
                };

                let state = TrackState {
                    velocity: dynamics.velocity,
                    ..state
                };

                (state, dynamics, status)
            }

            (None, Some(prev)) => match self.predictor.apply(&prev, &mut self.history) {
                Some(state) => {
                    debug!(
                        coast_frames = state.coast_frames,
                        x = state.position.x,
                        y = state.position.y,
                        "coasting"
                    );

                    let dynamics = DynamicsEstimate {
                        velocity: state.velocity,
                        growth_rate: 0.0,
                    };

                    (state, dynamics, TrackStatus::Coasting)
                }
                None => {
                    info!(coast_frames = prev.coast_frames, "target lost");
                    self.reset();

                    return FrameOutcome::NoTarget;
                }
            },

            (None, None) => return FrameOutcome::NoTarget,
        };

        self.state = Some(state);

        FrameOutcome::Target(self.report(frame, &state, &dynamics, status))
    }

    fn report(
        &self,
        frame: &Frame,
        state: &TrackState,
        dynamics: &DynamicsEstimate,
        status: TrackStatus,
    ) -> TrackReport {
        let (rx, ry) = self.config.reference_point.unwrap_or_else(|| frame.center());
        let position = state.pixel_position();
        let velocity = dynamics.velocity;

        TrackReport {
            status,
            coast_frames: state.coast_frames,
            position,
            radius: state.pixel_radius(),
            smoothed_position: state.position,
            smoothed_radius: state.radius,
            velocity,
            growth_rate: dynamics.growth_rate,
            direction: self.labeler.label(&velocity),
            is_moving: velocity.x.unsigned_abs() > 1 || velocity.y.unsigned_abs() > 1,
            assessment: self
                .classifier
                .assess(&position, dynamics, na::Point2::new(rx, ry)),
        }
    }
}

impl Tracking for Tracker {
    #[inline]
    fn update(&mut self, frame: &Frame) -> FrameOutcome {
        Tracker::update(self, frame)
    }

    #[inline]
    fn reset(&mut self) {
        Tracker::reset(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::RawDetection;

    fn square(cx: f32, cy: f32, r: f32) -> RawDetection {
        RawDetection::new(cx - r, cy - r, cx + r, cy + r, 0.9)
    }

    fn frame(detections: Vec<RawDetection>) -> Frame {
        Frame::new((800, 600), 0.0, detections)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TrackerConfig {
            buffer_size: 4,
            ..Default::default()
        };

        assert!(matches!(
            Tracker::new(config),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_no_target_without_state() {
        let mut tracker = Tracker::new(TrackerConfig::default()).unwrap();

        assert_eq!(tracker.update(&frame(vec![])), FrameOutcome::NoTarget);
        assert!(tracker.state().is_none());
        assert!(tracker.history().is_empty());
    }

    #[test]
    fn test_status_sequence() {
        let mut tracker = Tracker::new(TrackerConfig::default()).unwrap();

        let first = tracker.update(&frame(vec![square(100.0, 100.0, 10.0)]));
        assert_eq!(first.report().unwrap().status, TrackStatus::Acquired);

        let second = tracker.update(&frame(vec![square(100.0, 100.0, 10.0)]));
        assert_eq!(second.report().unwrap().status, TrackStatus::Tracking);

        let third = tracker.update(&frame(vec![]));
        let report = third.report().unwrap();
        assert_eq!(report.status, TrackStatus::Coasting);
        assert_eq!(report.coast_frames, 1);
        assert_eq!(report.growth_rate, 0.0);

        assert_eq!(tracker.history().len(), 3);
    }

    #[test]
    fn test_reference_point_defaults_to_frame_center() {
        let mut tracker = Tracker::new(TrackerConfig::default()).unwrap();
        let outcome = tracker.update(&frame(vec![square(400.0, 300.0, 10.0)]));
        let report = outcome.report().unwrap();

        assert_eq!(report.assessment.reference_point, na::Point2::new(400.0, 300.0));
        assert!(report.is_intercept());

        let mut tracker = Tracker::new(TrackerConfig {
            reference_point: Some((0.0, 0.0)),
            ..Default::default()
        })
        .unwrap();
        let outcome = tracker.update(&frame(vec![square(400.0, 300.0, 10.0)]));

        assert!(!outcome.report().unwrap().is_intercept());
    }

    #[test]
    fn test_reset_clears_track() {
        let mut tracker = Tracker::new(TrackerConfig::default()).unwrap();
        tracker.update(&frame(vec![square(100.0, 100.0, 10.0)]));
        tracker.reset();

        assert!(tracker.state().is_none());
        assert!(tracker.history().is_empty());
        assert_eq!(tracker.timings().frames, 1);
    }
}
