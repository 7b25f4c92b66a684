use tracing::trace;

use crate::config::{SelectionPolicy, TrackerConfig};
use crate::detection::{Measurement, RawDetection};

/// Drops low confidence and badly shaped boxes, then picks the single
/// measurement of the frame.
#[derive(Debug, Clone)]
pub struct DetectionFilter {
    pub confidence_min: f32,
    pub ratio_min: f32,
    pub ratio_max: f32,
    pub selection: SelectionPolicy,
}

impl DetectionFilter {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            confidence_min: config.confidence_min,
            ratio_min: config.ratio_min,
            ratio_max: config.ratio_max,
            selection: config.selection,
        }
    }

    pub fn accepts(&self, det: &RawDetection) -> bool {
        // NaN confidence fails this too
        if !(det.confidence >= self.confidence_min) {
            trace!(confidence = det.confidence, "detection below confidence floor");
            return false;
        }

        match det.aspect_ratio() {
            Some(ratio) if ratio >= self.ratio_min && ratio <= self.ratio_max => true,
            ratio => {
                trace!(?ratio, "detection outside aspect ratio band");
                false
            }
        }
    }

    pub fn select<'a, I>(&self, detections: I) -> Option<Measurement>
    where
        I: IntoIterator<Item = &'a RawDetection>,
    {
        let accepted = detections.into_iter().filter(|det| self.accepts(det));

        let best = match self.selection {
            SelectionPolicy::LastAccepted => accepted.last(),
            SelectionPolicy::HighestConfidence => {
                accepted.fold(None::<&RawDetection>, |best, det| match best {
                    Some(b) if b.confidence >= det.confidence => Some(b),
                    _ => Some(det),
                })
            }
        };

        best.map(RawDetection::measurement)
    }
}
