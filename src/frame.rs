use ndarray::ArrayView2;
use serde_derive::{Deserialize, Serialize};

use crate::detection::RawDetection;
use crate::error::Error;

/// Number of columns in a detector output row: x1, y1, x2, y2, confidence
pub const DETECTION_ROW_LEN: usize = 5;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Frame {
    pub dims: (u32, u32),
    #[serde(default)]
    pub timestamp: f32, // in seconds
    #[serde(default)]
    pub detections: Vec<RawDetection>,
}

impl Frame {
    pub fn new(dims: (u32, u32), timestamp: f32, detections: Vec<RawDetection>) -> Self {
        Self {
            dims,
            timestamp,
            detections,
        }
    }

    /// Builds a frame from raw detector output, one row per box laid out as
    /// `[x1, y1, x2, y2, confidence, ..]`. Extra columns (class scores) are ignored.
    pub fn from_array(
        dims: (u32, u32),
        timestamp: f32,
        rows: ArrayView2<'_, f32>,
    ) -> Result<Self, Error> {
        let ncols = rows.ncols();
        if rows.nrows() > 0 && ncols < DETECTION_ROW_LEN {
            return Err(Error::DetectionShape {
                expected: DETECTION_ROW_LEN,
                found: ncols,
            });
        }

        let detections = rows
            .outer_iter()
            .map(|row| RawDetection::new(row[0], row[1], row[2], row[3], row[4]))
            .collect();

        Ok(Self::new(dims, timestamp, detections))
    }

    /// Pixel center of the frame, rounded down like the capture grid.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        ((self.dims.0 / 2) as f32, (self.dims.1 / 2) as f32)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &RawDetection> {
        self.detections.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}
