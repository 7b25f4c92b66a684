use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb};

/// Single detector output: a box in pixel space and the model confidence
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RawDetection {
    pub bbox: BBox<Ltrb>,
    #[serde(rename = "p")]
    pub confidence: f32,
}

impl RawDetection {
    #[inline]
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, confidence: f32) -> Self {
        Self {
            bbox: BBox::ltrb(x1, y1, x2, y2),
            confidence,
        }
    }

    /// Width over height of the whole-pixel box, `None` for degenerate boxes.
    #[inline]
    pub fn aspect_ratio(&self) -> Option<f32> {
        self.bbox.truncated().as_ltwh().aspect_ratio()
    }

    /// Circle approximation of the box on whole pixels: center is the left/top
    /// edge plus half the extent, radius is half of the larger side.
    pub fn measurement(&self) -> Measurement {
        let ltwh = self.bbox.truncated().as_ltwh();
        let (w, h) = (ltwh.width() as i32, ltwh.height() as i32);

        Measurement {
            x: ltwh.left() + (w / 2) as f32,
            y: ltwh.top() + (h / 2) as f32,
            r: (w.max(h) / 2) as f32,
        }
    }
}

/// One accepted (x, y, radius) observation fed to the stabilizer
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub x: f32,
    pub y: f32,
    pub r: f32,
}

impl Measurement {
    #[inline]
    pub fn new(x: f32, y: f32, r: f32) -> Self {
        Self { x, y, r }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_uses_whole_pixels() {
        let det = RawDetection::new(10.6, 20.0, 31.2, 45.0, 0.9);
        let m = det.measurement();

        // 10..31 => w = 21, 20..45 => h = 25
        assert_eq!(m, Measurement::new(20.0, 32.0, 12.0));
    }

    #[test]
    fn test_square_box_measurement() {
        let det = RawDetection::new(90.0, 90.0, 110.0, 110.0, 0.5);

        assert_eq!(det.measurement(), Measurement::new(100.0, 100.0, 10.0));
        assert_eq!(det.aspect_ratio(), Some(1.0));
    }

    #[test]
    fn test_serde_layout() {
        let det = RawDetection::new(1.0, 2.0, 3.0, 4.0, 0.5);
        let json = serde_json::to_string(&det).unwrap();

        assert_eq!(json, r#"{"bbox":[1.0,2.0,3.0,4.0],"p":0.5}"#);

        let back: RawDetection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, det);
    }
}
