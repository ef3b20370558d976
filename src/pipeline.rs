//! Frame-driven pose pipeline.
//!
//! detector → identity ordering → smoothing → pose cache → renderers.
//! Everything runs on the caller's task; there are no worker threads.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::cache::PoseCache;
use crate::config::PipelineConfig;
use crate::error::{MocapError, Result};
use crate::pose::{Bone, DetectorOptions, DetectorSession, LandmarkSet, Pose, PoseDetector};
use crate::stats::{PerfStats, PerfTime, RotStat};
use crate::tracker::{compute_poses, stabilize_order, EndpointHeuristic, Extrapolated, Smoother};

/// Sequence number handed out when a detection starts.
///
/// A detection may only be applied if no later-started frame has been
/// applied already.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameTicket {
    seq: u64,
}

impl FrameTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

pub struct PoseSystem<D: PoseDetector> {
    session: DetectorSession<D>,
    config: PipelineConfig,
    endpoints: Box<dyn EndpointHeuristic>,
    smoother: Smoother,
    cache: PoseCache,
    perf: PerfStats,
    stats_window: usize,
    bone_stats: BTreeMap<Bone, RotStat>,
    next_seq: u64,
    applied_seq: Option<u64>,
}

impl<D: PoseDetector> PoseSystem<D> {
    /// Initialize the detector and build an empty pipeline around it.
    pub async fn start(detector: D, config: PipelineConfig, stats_window: usize) -> Result<Self> {
        let config = config.clamped();
        let options = DetectorOptions {
            max_poses: config.max_poses,
        };
        let session = DetectorSession::open(detector, &options).await?;
        Ok(Self {
            session,
            config,
            endpoints: Box::new(Extrapolated::default()),
            smoother: Smoother::new(),
            cache: PoseCache::new(),
            perf: PerfStats::new(stats_window),
            stats_window,
            bone_stats: BTreeMap::new(),
            next_seq: 0,
            applied_seq: None,
        })
    }

    /// Release the detector.
    pub fn shutdown(mut self) {
        self.session.close();
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Replace the live configuration. Takes effect from the next frame.
    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config.clamped();
    }

    /// Swap the forearm/foot endpoint heuristic.
    pub fn set_endpoint_heuristic(&mut self, endpoints: Box<dyn EndpointHeuristic>) {
        self.endpoints = endpoints;
        self.cache.invalidate();
    }

    /// Run the detector on one frame and feed the result into the pipeline.
    ///
    /// On detector failure the cached poses are left untouched and the error
    /// is returned. Returns the number of people detected.
    pub async fn ingest(&mut self, frame: &D::Frame, timestamp_ms: u64) -> Result<usize> {
        let ticket = self.begin_frame();
        let started = Instant::now();
        let detected = self.session.detect(frame, timestamp_ms).await;
        match detected {
            Ok(people) => {
                self.perf.record_detection(started.elapsed());
                self.apply_detection(ticket, people)
            }
            Err(err) => {
                warn!(timestamp_ms, error = %err, "detection failed; keeping last poses");
                Err(err)
            }
        }
    }

    /// Reserve the next frame sequence number.
    pub fn begin_frame(&mut self) -> FrameTicket {
        let ticket = FrameTicket { seq: self.next_seq };
        self.next_seq += 1;
        ticket
    }

    /// Apply a detection obtained outside [`ingest`](Self::ingest).
    ///
    /// Rejects the result with [`MocapError::StaleFrame`] if a frame that
    /// began later has already been applied.
    pub fn apply_detection(
        &mut self,
        ticket: FrameTicket,
        people: Vec<LandmarkSet>,
    ) -> Result<usize> {
        if let Some(latest) = self.applied_seq {
            if ticket.seq <= latest {
                warn!(seq = ticket.seq, latest, "dropping stale detection");
                return Err(MocapError::StaleFrame {
                    seq: ticket.seq,
                    latest,
                });
            }
        }

        let smoothing = self.config.smoothing;
        let count = people.len();
        let ordered = stabilize_order(people);
        let smoothed = self.smoother.apply(&ordered, smoothing);
        self.cache.ingest(smoothed);
        self.applied_seq = Some(ticket.seq);
        debug!(seq = ticket.seq, people = count, "landmarks ingested");
        Ok(count)
    }

    /// Latest poses, recomputed at most once per ingested frame.
    pub fn subscribe(&mut self) -> Arc<[Pose]> {
        let debug = self.config.debug;
        let endpoints = self.endpoints.as_ref();
        let perf = &mut self.perf;
        let bone_stats = &mut self.bone_stats;
        let window = self.stats_window;

        self.cache.subscribe_with(|people| {
            let started = Instant::now();
            let poses = compute_poses(people, endpoints, debug);
            perf.record_transform(started.elapsed());

            if debug {
                if let Some(first) = poses.first() {
                    for (bone, rot) in first.skeletal_rotation.iter() {
                        bone_stats
                            .entry(bone)
                            .or_insert_with(|| RotStat::new(window))
                            .push(rot);
                    }
                }
            }
            poses
        })
    }

    /// Current landmarks after ordering and smoothing.
    pub fn landmarks(&self) -> &[LandmarkSet] {
        self.cache.landmarks()
    }

    /// Times the pose transform has actually run.
    pub fn transform_count(&self) -> u64 {
        self.cache.computations()
    }

    /// Report time spent by a renderer drawing one frame.
    pub fn record_render(&mut self, elapsed: Duration) {
        self.perf.record_render(elapsed);
    }

    pub fn perf_snapshot(&self) -> PerfTime {
        self.perf.snapshot()
    }

    pub fn perf_ready(&self) -> bool {
        self.perf.ready()
    }

    /// Rolling rotation statistics of the first person, collected in debug mode.
    pub fn bone_stats(&self, bone: Bone) -> Option<&RotStat> {
        self.bone_stats.get(&bone)
    }

    pub fn detector(&self) -> &D {
        self.session.detector()
    }
}
