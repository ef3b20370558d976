//! Error type shared by the pipeline stages.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MocapError>;

#[derive(Debug, Error)]
pub enum MocapError {
    /// ランドマーク配列が短く、必要なインデックスが存在しない
    #[error("landmark {index} missing (set has {len} landmarks)")]
    MissingLandmark { index: usize, len: usize },

    /// 座標が有限値でない
    #[error("landmark {index} has non-finite coordinates")]
    MalformedLandmark { index: usize },

    /// 座標差が有限に収まらず骨の向きが定まらない
    #[error("bone {bone} is degenerate (non-finite direction)")]
    DegenerateBone { bone: &'static str },

    #[error("detector failed: {0}")]
    Detector(String),

    #[error("detector session is closed")]
    DetectorClosed,

    /// 新しいフレームが既に反映済み
    #[error("stale detection for frame {seq} (latest applied {latest})")]
    StaleFrame { seq: u64, latest: u64 },

    #[error("invalid replay data: {0}")]
    Replay(#[from] serde_json::Error),
}
