//! Detector that replays a recorded landmark stream.
//!
//! The recording is a JSON array of frames:
//! `[{"timestamp_ms": 0, "people": [[{"x":..,"y":..,"z":..,"visibility":..}, ...]]}]`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::detector::{DetectorOptions, PoseDetector};
use super::landmark::LandmarkSet;
use crate::error::{MocapError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub timestamp_ms: u64,
    #[serde(default)]
    pub people: Vec<LandmarkSet>,
}

pub struct ReplayDetector {
    frames: Vec<ReplayFrame>,
    max_poses: usize,
}

impl ReplayDetector {
    pub fn new(frames: Vec<ReplayFrame>) -> Self {
        Self {
            frames,
            max_poses: usize::MAX,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let frames: Vec<ReplayFrame> = serde_json::from_str(json)?;
        Ok(Self::new(frames))
    }

    pub fn frames(&self) -> &[ReplayFrame] {
        &self.frames
    }
}

#[async_trait(?Send)]
impl PoseDetector for ReplayDetector {
    /// Index into the recording.
    type Frame = usize;

    async fn initialize(&mut self, options: &DetectorOptions) -> Result<()> {
        self.max_poses = options.max_poses;
        Ok(())
    }

    async fn detect(&mut self, frame: &usize, _timestamp_ms: u64) -> Result<Vec<LandmarkSet>> {
        let recorded = self.frames.get(*frame).ok_or_else(|| {
            MocapError::Detector(format!(
                "frame {} out of range ({} recorded)",
                frame,
                self.frames.len()
            ))
        })?;
        Ok(recorded.people.iter().take(self.max_poses).cloned().collect())
    }

    fn close(&mut self) {
        self.frames.clear();
    }
}
