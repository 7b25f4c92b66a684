use nalgebra as na;
use serde_derive::Serialize;

use crate::config::TrackerConfig;
use crate::dynamics::DynamicsEstimate;
use crate::math::pixel_distance;

/// Sign based evasion cue: steer away from the side the target moves to.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvasiveHint {
    SteerLeft,
    SteerRight,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InterceptAssessment {
    pub predicted: na::Point2<i32>,
    pub reference_point: na::Point2<f32>,
    pub distance_to_zone: f32,
    pub is_intercept: bool,
    pub is_approaching: bool,
    pub evasive: Option<EvasiveHint>,
}

/// Frame-indexed linear extrapolation against a fixed collision zone.
#[derive(Debug, Clone)]
pub struct InterceptClassifier {
    pub prediction_frames: u32,
    pub collision_zone: f32,
    pub growth_threshold: f32,
}

impl InterceptClassifier {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            prediction_frames: config.prediction_frames,
            collision_zone: config.collision_zone,
            growth_threshold: config.growth_threshold,
        }
    }

    pub fn assess(
        &self,
        position: &na::Point2<i32>,
        dynamics: &DynamicsEstimate,
        reference_point: na::Point2<f32>,
    ) -> InterceptAssessment {
        let horizon = i32::try_from(self.prediction_frames).unwrap_or(i32::MAX);
        let predicted = na::Point2::new(
            position.x.saturating_add(dynamics.velocity.x.saturating_mul(horizon)),
            position.y.saturating_add(dynamics.velocity.y.saturating_mul(horizon)),
        );

        let distance_to_zone = pixel_distance(&predicted, &reference_point);
        let is_intercept = distance_to_zone < self.collision_zone;

        let evasive = if !is_intercept {
            None
        } else if dynamics.velocity.x > 0 {
            Some(EvasiveHint::SteerLeft)
        } else {
            Some(EvasiveHint::SteerRight)
        };

        InterceptAssessment {
            predicted,
            reference_point,
            distance_to_zone,
            is_intercept,
            is_approaching: dynamics.growth_rate > self.growth_threshold,
            evasive,
        }
    }
}
