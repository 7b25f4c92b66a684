use serde_derive::{Deserialize, Serialize};

use crate::error::Error;

/// Which accepted detection becomes the frame measurement when the detector
/// reports more than one box passing the filter.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Last accepted detection in emission order wins.
    #[default]
    LastAccepted,
    /// Most confident accepted detection wins, earlier one on ties.
    HighestConfidence,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// EMA weight of the new measurement. Lower is smoother but slower.
    pub smooth_factor: f32,
    /// Measurements closer than this to the smoothed position are ignored.
    pub deadzone_pixels: f32,
    pub buffer_size: usize,
    pub prediction_frames: u32,
    pub collision_zone: f32,
    pub growth_threshold: f32,
    pub movement_threshold: f32,
    pub velocity_calc_frames: usize,
    pub max_coast_frames: u32,
    pub confidence_min: f32,
    pub ratio_min: f32,
    pub ratio_max: f32,
    pub selection: SelectionPolicy,
    /// Intercept reference, frame center when unset.
    pub reference_point: Option<(f32, f32)>,
    /// Soft per-frame processing budget in microseconds.
    pub frame_budget_us: Option<u64>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            smooth_factor: 0.15,
            deadzone_pixels: 3.0,
            buffer_size: 32,
            prediction_frames: 15,
            collision_zone: 80.0,
            growth_threshold: 0.5,
            movement_threshold: 2.0,
            velocity_calc_frames: 5,
            max_coast_frames: 10,
            confidence_min: 0.25,
            ratio_min: 0.60,
            ratio_max: 1.60,
            selection: SelectionPolicy::LastAccepted,
            reference_point: None,
            frame_budget_us: Some(33_333),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.buffer_size == 0 {
            return Err(Error::config("buffer_size", "must be positive"));
        }

        if self.velocity_calc_frames < 2 {
            return Err(Error::config(
                "velocity_calc_frames",
                format!("must be at least 2, got {}", self.velocity_calc_frames),
            ));
        }

        // growth rate compares two disjoint windows of the radius history
        if self.velocity_calc_frames * 2 > self.buffer_size {
            return Err(Error::config(
                "velocity_calc_frames",
                format!(
                    "two windows of {} frames do not fit into a buffer of {}",
                    self.velocity_calc_frames, self.buffer_size
                ),
            ));
        }

        if !(self.smooth_factor > 0.0 && self.smooth_factor <= 1.0) {
            return Err(Error::config(
                "smooth_factor",
                format!("must be in (0, 1], got {}", self.smooth_factor),
            ));
        }

        non_negative("deadzone_pixels", self.deadzone_pixels)?;
        non_negative("collision_zone", self.collision_zone)?;
        non_negative("movement_threshold", self.movement_threshold)?;

        if !self.growth_threshold.is_finite() {
            return Err(Error::config("growth_threshold", "must be finite"));
        }

        if !(0.0..=1.0).contains(&self.confidence_min) {
            return Err(Error::config(
                "confidence_min",
                format!("must be in [0, 1], got {}", self.confidence_min),
            ));
        }

        if !(self.ratio_min > 0.0 && self.ratio_min.is_finite()) {
            return Err(Error::config(
                "ratio_min",
                format!("must be positive, got {}", self.ratio_min),
            ));
        }

        if !(self.ratio_max >= self.ratio_min) {
            return Err(Error::config(
                "ratio_max",
                format!(
                    "must not be below ratio_min ({} < {})",
                    self.ratio_max, self.ratio_min
                ),
            ));
        }

        if let Some((x, y)) = self.reference_point {
            if !(x.is_finite() && y.is_finite()) {
                return Err(Error::config("reference_point", "must be finite"));
            }
        }

        // the horizon multiplies i32 pixel velocities
        if i32::try_from(self.prediction_frames).is_err() {
            return Err(Error::config(
                "prediction_frames",
                format!("must not exceed {}, got {}", i32::MAX, self.prediction_frames),
            ));
        }

        if self.frame_budget_us == Some(0) {
            return Err(Error::config("frame_budget_us", "must be positive"));
        }

        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), Error> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::config(
            field,
            format!("must be a finite non-negative number, got {}", value),
        ))
    }
}
