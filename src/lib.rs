pub mod bbox;
pub mod config;
pub mod detection;
pub mod direction;
pub mod dynamics;
pub mod error;
pub mod filter;
pub mod frame;
pub mod history;
pub mod intercept;
pub mod math;
pub mod predictor;
pub mod stabilizer;
pub mod timing;
pub mod track;
pub mod tracker;

mod circular_queue;

pub use config::{SelectionPolicy, TrackerConfig};
pub use detection::{Measurement, RawDetection};
pub use error::Error;
pub use frame::Frame;
pub use track::{FrameOutcome, TrackReport, TrackState, TrackStatus};
pub use tracker::Tracker;

/// Per-frame tracking loop. Calls must be serialized, one frame at a time.
pub trait Tracking {
    fn update(&mut self, frame: &Frame) -> FrameOutcome;
    fn reset(&mut self);
}
