//! テスト用のランドマーク集合

use crate::pose::{Landmark, LandmarkIndex, LandmarkSet};

/// 画像座標系（y下向き、z手前が負）で正面を向いて腕を水平に広げた姿勢
///
/// 中点が厳密に一致するよう2進で正確に表せる座標のみを使う。
pub(crate) fn standing_person() -> LandmarkSet {
    standing_person_at(0.0)
}

/// x方向に dx だけずらした同じ姿勢
pub(crate) fn standing_person_at(dx: f32) -> LandmarkSet {
    use LandmarkIndex::*;
    let mut lms = vec![Landmark::new(0.5 + dx, 0.5, 0.0, 1.0); LandmarkIndex::COUNT];
    let mut put = |idx: LandmarkIndex, x: f32, y: f32, z: f32| {
        lms[idx as usize] = Landmark::new(x + dx, y, z, 1.0);
    };
    put(Nose, 0.5, 0.125, -0.125);
    put(LeftEar, 0.4375, 0.125, 0.0);
    put(RightEar, 0.5625, 0.125, 0.0);
    put(LeftShoulder, 0.375, 0.25, 0.0);
    put(RightShoulder, 0.625, 0.25, 0.0);
    put(LeftElbow, 0.25, 0.25, 0.0);
    put(RightElbow, 0.75, 0.25, 0.0);
    put(LeftWrist, 0.125, 0.25, 0.0);
    put(RightWrist, 0.875, 0.25, 0.0);
    put(LeftHip, 0.4375, 0.625, 0.0);
    put(RightHip, 0.5625, 0.625, 0.0);
    put(LeftKnee, 0.4375, 0.75, 0.0);
    put(RightKnee, 0.5625, 0.75, 0.0);
    put(LeftAnkle, 0.4375, 0.875, 0.0);
    put(RightAnkle, 0.5625, 0.875, 0.0);
    put(LeftFootIndex, 0.4375, 0.9375, -0.0625);
    put(RightFootIndex, 0.5625, 0.9375, -0.0625);
    LandmarkSet::new(lms)
}

/// 左腕を真上に上げ、右膝を前に 90° 曲げた姿勢
///
/// 右足首は膝の真正面 (z-)、右つま先は足首の真下。
pub(crate) fn asymmetric_person() -> LandmarkSet {
    use LandmarkIndex::*;
    let mut lms = standing_person().landmarks().to_vec();
    let mut put = |idx: LandmarkIndex, x: f32, y: f32, z: f32| {
        lms[idx as usize] = Landmark::new(x, y, z, 1.0);
    };
    put(LeftElbow, 0.375, 0.125, 0.0);
    put(LeftWrist, 0.375, 0.0, 0.0);
    put(RightAnkle, 0.5625, 0.75, -0.125);
    put(RightFootIndex, 0.5625, 0.875, -0.125);
    LandmarkSet::new(lms)
}
