use std::time::Duration;

/// Processing time of a single `Tracker::update` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTiming {
    pub frame_index: u64,
    pub elapsed: Duration,
    pub over_budget: bool,
}

/// Per-frame latency hook.
pub trait FrameObserver {
    fn on_frame(&mut self, timing: &FrameTiming);
}

impl<F> FrameObserver for F
where
    F: FnMut(&FrameTiming),
{
    #[inline]
    fn on_frame(&mut self, timing: &FrameTiming) {
        self(timing)
    }
}

/// Running latency statistics of a tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameTimings {
    pub frames: u64,
    pub over_budget: u64,
    pub last: Duration,
    pub max: Duration,
    pub total: Duration,
}

impl FrameTimings {
    pub fn record(
        &mut self,
        frame_index: u64,
        elapsed: Duration,
        budget: Option<Duration>,
    ) -> FrameTiming {
        let over_budget = budget.map_or(false, |b| elapsed > b);

        self.frames += 1;
        self.last = elapsed;
        self.max = self.max.max(elapsed);
        self.total += elapsed;
        if over_budget {
            self.over_budget += 1;
        }

        FrameTiming {
            frame_index,
            elapsed,
            over_budget,
        }
    }

    pub fn mean(&self) -> Option<Duration> {
        if self.frames == 0 {
            return None;
        }

        let frames = u32::try_from(self.frames).unwrap_or(u32::MAX);
        Some(self.total / frames)
    }
}
