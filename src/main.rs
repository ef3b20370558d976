use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use mocap_rig::config::Config;
use mocap_rig::pose::{Bone, ReplayDetector};
use mocap_rig::render::sticks;
use mocap_rig::{telemetry, PoseSystem};

/// 記録済みランドマーク列を再生して骨の回転を表示する
#[derive(Parser, Debug)]
#[command(name = "mocap-replay")]
struct Args {
    /// ランドマーク記録 (JSON)
    frames: PathBuf,

    /// 設定ファイル
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// 平滑化係数を上書き
    #[arg(long)]
    smoothing: Option<f32>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load_or_default(&args.config);
    if let Some(smoothing) = args.smoothing {
        config.pipeline.smoothing = smoothing;
    }
    telemetry::init(&config.log);

    let json = std::fs::read_to_string(&args.frames)
        .with_context(|| format!("failed to read {}", args.frames.display()))?;
    let detector = ReplayDetector::from_json(&json)?;

    let mut system =
        PoseSystem::start(detector, config.pipeline.clone(), config.stats.window).await?;
    let timestamps: Vec<u64> = system
        .detector()
        .frames()
        .iter()
        .map(|f| f.timestamp_ms)
        .collect();

    info!(
        frames = timestamps.len(),
        smoothing = system.config().smoothing,
        debug = system.config().debug,
        "replay start"
    );

    for (index, &timestamp_ms) in timestamps.iter().enumerate() {
        if let Err(e) = system.ingest(&index, timestamp_ms).await {
            warn!(frame = index, error = %e, "ingest failed");
        }

        let started = Instant::now();
        let poses = system.subscribe();
        let lines: usize = system.landmarks().iter().map(|set| sticks(set).len()).sum();
        println!("[{:>6}ms] {} pose(s), {} stick(s)", timestamp_ms, poses.len(), lines);
        for (person, pose) in poses.iter().enumerate() {
            let spine = pose.skeletal_rotation.get(Bone::Spine).to_degrees();
            let head = pose.skeletal_rotation.get(Bone::Head).to_degrees();
            println!(
                "  #{} spine p={:.0} y={:.0} r={:.0}  head p={:.0} y={:.0} r={:.0}",
                person, spine.pitch, spine.yaw, spine.roll, head.pitch, head.yaw, head.roll
            );
            for line in &pose.debug {
                println!("    {}", line);
            }
        }
        system.record_render(started.elapsed());
    }

    let perf = system.perf_snapshot();
    if perf.ready() {
        let (detection_hz, render_hz, transform_hz) = perf.hz();
        println!();
        println!("=== 処理時間 (移動平均) ===");
        println!("  検出:   {:.3}ms ({:.0} Hz)", perf.detection_ms, detection_hz);
        println!("  変換:   {:.3}ms ({:.0} Hz)", perf.transform_ms, transform_hz);
        println!("  描画:   {:.3}ms ({:.0} Hz)", perf.render_ms, render_hz);
    }

    if system.config().debug {
        println!();
        println!("=== 骨の回転 (人物 #0, 平均) ===");
        for bone in Bone::ALL {
            if let Some(stat) = system.bone_stats(bone) {
                let mean = stat.mean().to_degrees();
                println!(
                    "  {:<16} p={:.1} y={:.1} r={:.1} ({} samples)",
                    bone.name(),
                    mean.pitch,
                    mean.yaw,
                    mean.roll,
                    stat.len()
                );
            }
        }
    }

    system.shutdown();
    Ok(())
}
