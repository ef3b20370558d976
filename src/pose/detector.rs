use async_trait::async_trait;
use tracing::{debug, warn};

use super::landmark::LandmarkSet;
use crate::error::{MocapError, Result};

/// 検出器の初期化パラメータ
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorOptions {
    /// 1フレームで検出する最大人数
    pub max_poses: usize,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self { max_poses: 2 }
    }
}

/// 画像フレームからランドマーク集合を返す外部検出器
///
/// パイプラインは単一スレッドで駆動するため Future に Send は要求しない。
#[async_trait(?Send)]
pub trait PoseDetector {
    /// 検出器に渡す不透明なフレームハンドル
    type Frame: ?Sized;

    /// モデル読み込みなどの初期化
    async fn initialize(&mut self, options: &DetectorOptions) -> Result<()>;

    /// 1フレームを検出し、0人以上のランドマーク集合を返す
    async fn detect(&mut self, frame: &Self::Frame, timestamp_ms: u64) -> Result<Vec<LandmarkSet>>;

    /// リソース解放。Drop からも呼ばれるため同期。
    fn close(&mut self);
}

/// 初期化済みの検出器を保持し、解放を保証するガード
pub struct DetectorSession<D: PoseDetector> {
    detector: D,
    open: bool,
}

impl<D: PoseDetector> DetectorSession<D> {
    pub async fn open(mut detector: D, options: &DetectorOptions) -> Result<Self> {
        detector.initialize(options).await?;
        debug!(max_poses = options.max_poses, "detector session opened");
        Ok(Self {
            detector,
            open: true,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub async fn detect(
        &mut self,
        frame: &D::Frame,
        timestamp_ms: u64,
    ) -> Result<Vec<LandmarkSet>> {
        if !self.open {
            return Err(MocapError::DetectorClosed);
        }
        self.detector.detect(frame, timestamp_ms).await
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    pub fn close(&mut self) {
        if self.open {
            self.detector.close();
            self.open = false;
            debug!("detector session closed");
        }
    }
}

impl<D: PoseDetector> Drop for DetectorSession<D> {
    fn drop(&mut self) {
        if self.open {
            warn!("detector session dropped while open; closing");
            self.close();
        }
    }
}
