use std::time::Duration;

use serde::Serialize;

use super::ring::RingStat;

/// Rolling mean duration of each pipeline stage, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerfTime {
    pub detection_ms: f64,
    pub render_ms: f64,
    pub transform_ms: f64,
}

impl PerfTime {
    pub const NULL: PerfTime = PerfTime {
        detection_ms: f64::NAN,
        render_ms: f64::NAN,
        transform_ms: f64::NAN,
    };

    /// True once every stage has at least one sample.
    pub fn ready(&self) -> bool {
        !(self.detection_ms.is_nan() || self.render_ms.is_nan() || self.transform_ms.is_nan())
    }

    /// Stage rates in Hz as (detection, render, transform).
    pub fn hz(&self) -> (f64, f64, f64) {
        (
            rate(self.detection_ms),
            rate(self.render_ms),
            rate(self.transform_ms),
        )
    }
}

fn rate(ms: f64) -> f64 {
    1000.0 / ms
}

/// Stage timing accumulators behind [`PerfTime`].
#[derive(Debug, Clone)]
pub struct PerfStats {
    detection: RingStat,
    transform: RingStat,
    render: RingStat,
}

impl PerfStats {
    pub const DEFAULT_WINDOW: usize = 100;

    pub fn new(window: usize) -> Self {
        Self {
            detection: RingStat::new(window),
            transform: RingStat::new(window),
            render: RingStat::new(window),
        }
    }

    pub fn record_detection(&mut self, elapsed: Duration) {
        self.detection.push(as_ms(elapsed));
    }

    pub fn record_transform(&mut self, elapsed: Duration) {
        self.transform.push(as_ms(elapsed));
    }

    pub fn record_render(&mut self, elapsed: Duration) {
        self.render.push(as_ms(elapsed));
    }

    pub fn snapshot(&self) -> PerfTime {
        PerfTime {
            detection_ms: self.detection.mean(),
            render_ms: self.render.mean(),
            transform_ms: self.transform.mean(),
        }
    }

    pub fn ready(&self) -> bool {
        !(self.detection.is_empty() || self.transform.is_empty() || self.render.is_empty())
    }
}

impl Default for PerfStats {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

fn as_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}
