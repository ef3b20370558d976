//! Dirty-flag memo of the per-frame pose transform.

use std::sync::Arc;

use tracing::debug;

use crate::pose::{LandmarkSet, Pose};

/// Holds the current landmarks and the poses derived from them.
///
/// `ingest` marks the cache dirty; the next `subscribe_with` runs the
/// transform once and every later call returns the same shared slice until
/// the next ingest.
pub struct PoseCache {
    landmarks: Vec<LandmarkSet>,
    poses: Arc<[Pose]>,
    dirty: bool,
    computations: u64,
}

impl PoseCache {
    pub fn new() -> Self {
        Self {
            landmarks: Vec::new(),
            poses: Arc::from(Vec::new()),
            dirty: false,
            computations: 0,
        }
    }

    pub fn ingest(&mut self, landmarks: Vec<LandmarkSet>) {
        self.landmarks = landmarks;
        self.dirty = true;
    }

    /// Force a recompute on the next subscribe without new landmarks.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn landmarks(&self) -> &[LandmarkSet] {
        &self.landmarks
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of times the transform has run.
    pub fn computations(&self) -> u64 {
        self.computations
    }

    /// Last computed poses without triggering a recompute.
    pub fn cached(&self) -> Arc<[Pose]> {
        Arc::clone(&self.poses)
    }

    pub fn subscribe_with<F>(&mut self, transform: F) -> Arc<[Pose]>
    where
        F: FnOnce(&[LandmarkSet]) -> Vec<Pose>,
    {
        if self.dirty {
            self.poses = Arc::from(transform(&self.landmarks));
            self.dirty = false;
            self.computations += 1;
            debug!(
                people = self.landmarks.len(),
                poses = self.poses.len(),
                "recomputed poses"
            );
        }
        Arc::clone(&self.poses)
    }
}

impl Default for PoseCache {
    fn default() -> Self {
        Self::new()
    }
}
