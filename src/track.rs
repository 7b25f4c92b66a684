use nalgebra as na;
use serde_derive::Serialize;

use crate::bbox::{BBox, Ltrb};
use crate::detection::Measurement;
use crate::direction::Direction;
use crate::history::Sample;
use crate::intercept::InterceptAssessment;
use crate::math::to_pixel;

/// Persistent state of the single tracked target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackState {
    // sub-pixel, accumulates EMA steps smaller than a pixel
    pub position: na::Point2<f32>,
    pub radius: f32,
    pub coast_frames: u32,
    pub velocity: na::Vector2<i32>,
}

impl TrackState {
    /// First acquisition adopts the measurement as is.
    pub fn acquire(m: Measurement) -> Self {
        Self {
            position: na::Point2::new(m.x, m.y),
            radius: m.r,
            coast_frames: 0,
            velocity: na::Vector2::zeros(),
        }
    }

    #[inline]
    pub fn pixel_position(&self) -> na::Point2<i32> {
        to_pixel(&self.position)
    }

    #[inline]
    pub fn pixel_radius(&self) -> i32 {
        self.radius as i32
    }

    #[inline]
    pub fn sample(&self) -> Sample {
        Sample {
            position: self.pixel_position(),
            radius: self.pixel_radius(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrackStatus {
    /// First frame of a new track.
    Acquired,
    /// Fresh detection this frame.
    Tracking,
    /// No detection, position dead-reckoned from the last velocity.
    Coasting,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TrackReport {
    pub status: TrackStatus,
    pub coast_frames: u32,
    pub position: na::Point2<i32>,
    pub radius: i32,
    pub smoothed_position: na::Point2<f32>,
    pub smoothed_radius: f32,
    pub velocity: na::Vector2<i32>,
    pub growth_rate: f32,
    pub direction: Direction,
    pub is_moving: bool,
    pub assessment: InterceptAssessment,
}

impl TrackReport {
    /// Square around the reported circle, what a HUD draws for the target.
    pub fn bbox(&self) -> BBox<Ltrb> {
        let side = self.radius as f32 * 2.0;

        BBox::xywh(self.position.x as f32, self.position.y as f32, side, side).as_ltrb()
    }

    #[inline]
    pub fn is_intercept(&self) -> bool {
        self.assessment.is_intercept
    }

    #[inline]
    pub fn is_approaching(&self) -> bool {
        self.assessment.is_approaching
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameOutcome {
    NoTarget,
    Target(TrackReport),
}

impl FrameOutcome {
    #[inline]
    pub fn report(&self) -> Option<&TrackReport> {
        match self {
            FrameOutcome::NoTarget => None,
            FrameOutcome::Target(report) => Some(report),
        }
    }

    #[inline]
    pub fn is_target(&self) -> bool {
        matches!(self, FrameOutcome::Target(_))
    }
}
