use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::stats::PerfStats;
use crate::tracker::MAX_SMOOTHING;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// フレームごとに読み直されるパイプライン設定
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PipelineConfig {
    /// 平滑化係数 (0.0〜MAX_SMOOTHING)。0 で無効
    #[serde(default = "default_smoothing")]
    pub smoothing: f32,
    /// 姿勢にデバッグ文字列を付け、骨ごとの統計を取る
    #[serde(default)]
    pub debug: bool,
    /// 検出器に要求する最大人数
    #[serde(default = "default_max_poses")]
    pub max_poses: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// 移動平均の窓サイズ（サンプル数）
    #[serde(default = "default_window")]
    pub window: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// RUST_LOG 未設定時のフィルタ
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_smoothing() -> f32 { 0.5 }
fn default_max_poses() -> usize { 2 }
fn default_window() -> usize { PerfStats::DEFAULT_WINDOW }
fn default_level() -> String { "info".to_string() }

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            smoothing: default_smoothing(),
            debug: false,
            max_poses: default_max_poses(),
        }
    }
}

impl PipelineConfig {
    /// 平滑化係数を有効範囲に収めたコピー。NaN は 0 扱い
    pub fn clamped(&self) -> Self {
        let smoothing = if self.smoothing.is_nan() {
            0.0
        } else {
            self.smoothing.clamp(0.0, MAX_SMOOTHING)
        };
        Self {
            smoothing,
            ..self.clone()
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { window: default_window() }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: default_level() }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.pipeline = config.pipeline.clamped();
        Ok(config)
    }

    /// 読めなければ既定値。ログ初期化前に呼ばれるため標準エラーに出す
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("config: {:#} (using defaults)", e);
                Self::default()
            }
        }
    }
}
