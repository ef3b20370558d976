use crate::error::Result;
use crate::pose::{mid_point, Landmark, LandmarkIndex, LandmarkSet};

/// 棒人間の接続定義 (開始ランドマーク, 終了ランドマーク)
pub const STICK_CONNECTIONS: [(LandmarkIndex, LandmarkIndex); 24] = [
    // 肩
    (LandmarkIndex::LeftShoulder, LandmarkIndex::RightShoulder),
    // 腕
    (LandmarkIndex::LeftShoulder, LandmarkIndex::LeftElbow),
    (LandmarkIndex::RightShoulder, LandmarkIndex::RightElbow),
    (LandmarkIndex::LeftElbow, LandmarkIndex::LeftWrist),
    (LandmarkIndex::RightElbow, LandmarkIndex::RightWrist),
    // 手
    (LandmarkIndex::LeftWrist, LandmarkIndex::LeftThumb),
    (LandmarkIndex::RightWrist, LandmarkIndex::RightThumb),
    (LandmarkIndex::LeftThumb, LandmarkIndex::LeftIndex),
    (LandmarkIndex::RightThumb, LandmarkIndex::RightIndex),
    (LandmarkIndex::LeftIndex, LandmarkIndex::LeftPinky),
    (LandmarkIndex::RightIndex, LandmarkIndex::RightPinky),
    (LandmarkIndex::LeftPinky, LandmarkIndex::LeftWrist),
    (LandmarkIndex::RightPinky, LandmarkIndex::RightWrist),
    // 下半身
    (LandmarkIndex::LeftHip, LandmarkIndex::RightHip),
    (LandmarkIndex::LeftHip, LandmarkIndex::LeftKnee),
    (LandmarkIndex::RightHip, LandmarkIndex::RightKnee),
    (LandmarkIndex::LeftKnee, LandmarkIndex::LeftAnkle),
    (LandmarkIndex::RightKnee, LandmarkIndex::RightAnkle),
    (LandmarkIndex::LeftAnkle, LandmarkIndex::LeftHeel),
    (LandmarkIndex::RightAnkle, LandmarkIndex::RightHeel),
    (LandmarkIndex::LeftHeel, LandmarkIndex::LeftFootIndex),
    (LandmarkIndex::RightHeel, LandmarkIndex::RightFootIndex),
    // 胴体（対角）
    (LandmarkIndex::LeftShoulder, LandmarkIndex::RightHip),
    (LandmarkIndex::RightShoulder, LandmarkIndex::LeftHip),
];

/// 線分 (始点, 終点)
pub type Stick = (Landmark, Landmark);

/// 肩中点→腰中点 の背骨
pub fn spine_stick(set: &LandmarkSet) -> Result<Stick> {
    let neck = mid_point(
        set.get(LandmarkIndex::LeftShoulder)?,
        set.get(LandmarkIndex::RightShoulder)?,
    );
    let sacrum = mid_point(
        set.get(LandmarkIndex::LeftHip)?,
        set.get(LandmarkIndex::RightHip)?,
    );
    Ok((neck, sacrum))
}

/// 1人分の描画用線分。存在しないランドマークを含む接続は飛ばす
pub fn sticks(set: &LandmarkSet) -> Vec<Stick> {
    let mut lines: Vec<Stick> = STICK_CONNECTIONS
        .iter()
        .filter_map(|&(a, b)| Some((*set.get(a).ok()?, *set.get(b).ok()?)))
        .collect();
    if let Ok(spine) = spine_stick(set) {
        lines.push(spine);
    }
    lines
}
