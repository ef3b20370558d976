use std::f32::consts::FRAC_PI_2;

use nalgebra::Vector3;
use tracing::warn;

use crate::error::{MocapError, Result};
use crate::pose::{LandmarkIndex, LandmarkSet, Pose, Rot, SkeletalRotation};

/// 頭の基準姿勢オフセット
///
/// Tポーズでは鼻が耳のラインより前に出るため、首に対して
/// pitch と roll が約 90°、yaw が約 -90° ずれる。これを打ち消して静止時に 0 にする。
pub const HEAD_OFFSET: Rot = Rot {
    pitch: -FRAC_PI_2,
    yaw: FRAC_PI_2,
    roll: -FRAC_PI_2,
};

/// 頭の roll のみ符号反転
pub const HEAD_SCALE: Rot = Rot {
    pitch: 1.0,
    yaw: 1.0,
    roll: -1.0,
};

/// 前腕と足の終点を合成するヒューリスティック
///
/// ランドマークに前腕・足の先端に相当する点がないため、終点を推定で補う。
/// 既定実装 [`Extrapolated`] は暫定的なもので、差し替えられるよう分離している。
pub trait EndpointHeuristic {
    /// 肘→手首 を延長した前腕の終点
    fn forearm_end(&self, elbow: &Vector3<f32>, wrist: &Vector3<f32>) -> Vector3<f32>;

    /// つま先から下方向にずらした足の終点
    fn foot_end(&self, ankle: &Vector3<f32>, foot_index: &Vector3<f32>) -> Vector3<f32>;
}

/// 既定の終点推定
#[derive(Debug, Clone, Copy)]
pub struct Extrapolated {
    /// 足の終点に加える鉛直方向のずれ（正規化座標）
    pub foot_drop: f32,
}

impl Default for Extrapolated {
    fn default() -> Self {
        Self { foot_drop: -0.1 }
    }
}

impl EndpointHeuristic for Extrapolated {
    fn forearm_end(&self, elbow: &Vector3<f32>, wrist: &Vector3<f32>) -> Vector3<f32> {
        // TODO: 手の指ランドマーク（人差し指・小指の中点）を使った終点と比較する
        wrist + (wrist - elbow)
    }

    fn foot_end(&self, _ankle: &Vector3<f32>, foot_index: &Vector3<f32>) -> Vector3<f32> {
        foot_index + Vector3::new(0.0, self.foot_drop, 0.0)
    }
}

/// 長さ 0 のベクトルは 0 ベクトルのまま返す正規化
///
/// 関節が重なっても atan2(0, 0) = 0 として角度が有限に保たれる。
fn unit(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}

/// 参照骨 (start→mid) に対する対象骨 (mid→end) の回転
pub fn calc_bone(
    start: &Vector3<f32>,
    mid: &Vector3<f32>,
    end: &Vector3<f32>,
    offset: Rot,
    scale: Rot,
) -> Rot {
    let reference = unit(mid - start);
    let target = unit(end - mid);

    // 鉛直軸まわり
    let yaw = target.z.atan2(target.x) - reference.z.atan2(reference.x);

    // 左右軸まわり
    let pitch = target.y.atan2(target.x.hypot(target.z))
        - reference.y.atan2(reference.x.hypot(reference.z));

    // 2方向のなす角（符号なし）
    let roll = reference.cross(&target).norm().atan2(reference.dot(&target));

    Rot { pitch, yaw, roll }.offset_scale(offset, scale)
}

fn plain_bone(start: &Vector3<f32>, mid: &Vector3<f32>, end: &Vector3<f32>) -> Rot {
    calc_bone(start, mid, end, Rot::ZERO, Rot::UNIT)
}

fn flatten(v: Vector3<f32>) -> Vector3<f32> {
    unit(Vector3::new(v.x, 0.0, v.z))
}

/// 腰ラインと肩ラインから背骨の回転を求める
///
/// - pitch: 腰中点→肩中点 の前後傾き
/// - yaw: 水平面に投影した肩ラインの腰ラインに対するねじれ
/// - roll: 肩の高低差による左右の傾き
pub fn calc_spine(
    left_hip: &Vector3<f32>,
    right_hip: &Vector3<f32>,
    left_shoulder: &Vector3<f32>,
    right_shoulder: &Vector3<f32>,
) -> Rot {
    let hip_center = (left_hip + right_hip) * 0.5;
    let shoulder_center = (left_shoulder + right_shoulder) * 0.5;
    let spine = unit(shoulder_center - hip_center);

    let pitch = (-spine.z).clamp(-1.0, 1.0).asin();

    let hip_line = flatten(right_hip - left_hip);
    let shoulder_line = flatten(right_shoulder - left_shoulder);
    let yaw = shoulder_line.z.atan2(shoulder_line.x) - hip_line.z.atan2(hip_line.x);

    let vertical = right_shoulder.y - left_shoulder.y;
    let horizontal = (right_shoulder.x - left_shoulder.x).hypot(right_shoulder.z - left_shoulder.z);
    let roll = -vertical.atan2(horizontal);

    Rot { pitch, yaw, roll }
}

/// 1人分のランドマークから全骨の回転を計算する
pub fn skeletal_rotation(set: &LandmarkSet) -> Result<SkeletalRotation> {
    skeletal_rotation_with(set, &Extrapolated::default())
}

pub fn skeletal_rotation_with<E: EndpointHeuristic + ?Sized>(
    set: &LandmarkSet,
    endpoints: &E,
) -> Result<SkeletalRotation> {
    use LandmarkIndex::*;

    let nose = set.point(Nose)?;
    let left_shoulder = set.point(LeftShoulder)?;
    let right_shoulder = set.point(RightShoulder)?;
    let left_elbow = set.point(LeftElbow)?;
    let right_elbow = set.point(RightElbow)?;
    let left_wrist = set.point(LeftWrist)?;
    let right_wrist = set.point(RightWrist)?;
    let left_hip = set.point(LeftHip)?;
    let right_hip = set.point(RightHip)?;
    let left_knee = set.point(LeftKnee)?;
    let right_knee = set.point(RightKnee)?;
    let left_ankle = set.point(LeftAnkle)?;
    let right_ankle = set.point(RightAnkle)?;
    let left_foot = set.point(LeftFootIndex)?;
    let right_foot = set.point(RightFootIndex)?;

    let mid_shoulder = set.mid(LeftShoulder, RightShoulder)?;
    let mid_hip = set.mid(LeftHip, RightHip)?;
    let mid_ear = set.mid(LeftEar, RightEar)?;

    let rotation = SkeletalRotation {
        spine: calc_spine(&left_hip, &right_hip, &left_shoulder, &right_shoulder),
        neck: plain_bone(&mid_hip, &mid_shoulder, &mid_ear),
        head: calc_bone(&mid_shoulder, &mid_ear, &nose, HEAD_OFFSET, HEAD_SCALE),

        left_shoulder: plain_bone(&mid_shoulder, &left_shoulder, &left_elbow),
        right_shoulder: plain_bone(&mid_shoulder, &right_shoulder, &right_elbow),
        left_upper_arm: plain_bone(&left_shoulder, &left_elbow, &left_wrist),
        right_upper_arm: plain_bone(&right_shoulder, &right_elbow, &right_wrist),
        left_forearm: plain_bone(
            &left_elbow,
            &left_wrist,
            &endpoints.forearm_end(&left_elbow, &left_wrist),
        ),
        right_forearm: plain_bone(
            &right_elbow,
            &right_wrist,
            &endpoints.forearm_end(&right_elbow, &right_wrist),
        ),

        left_upper_leg: plain_bone(&left_hip, &left_knee, &left_ankle),
        right_upper_leg: plain_bone(&right_hip, &right_knee, &right_ankle),
        left_lower_leg: plain_bone(&left_knee, &left_ankle, &left_foot),
        right_lower_leg: plain_bone(&right_knee, &right_ankle, &right_foot),
        left_foot: plain_bone(
            &left_ankle,
            &left_foot,
            &endpoints.foot_end(&left_ankle, &left_foot),
        ),
        right_foot: plain_bone(
            &right_ankle,
            &right_foot,
            &endpoints.foot_end(&right_ankle, &right_foot),
        ),
    };

    if let Some((bone, _)) = rotation.iter().find(|(_, rot)| !rot.is_finite()) {
        return Err(MocapError::DegenerateBone { bone: bone.name() });
    }
    Ok(rotation)
}

/// フレーム内の全員の姿勢を計算する
///
/// 空の集合（人物なし）は何も出力しない。計算に失敗した人物は
/// その人だけ除外し、残りは返す。
pub fn compute_poses<E: EndpointHeuristic + ?Sized>(
    people: &[LandmarkSet],
    endpoints: &E,
    debug: bool,
) -> Vec<Pose> {
    people
        .iter()
        .enumerate()
        .filter(|(_, set)| !set.is_empty())
        .filter_map(|(person, set)| match skeletal_rotation_with(set, endpoints) {
            Ok(rotation) => {
                let pose = Pose::new(rotation);
                Some(if debug { pose.with_debug_lines() } else { pose })
            }
            Err(err) => {
                warn!(person, error = %err, "skipping pose");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{Bone, Landmark};
    use crate::tracker::fixtures::{asymmetric_person, standing_person};
    use std::f32::consts::{FRAC_PI_4, PI};

    const EPS: f32 = 1e-3;

    fn v(x: f32, y: f32, z: f32) -> Vector3<f32> {
        Vector3::new(x, y, z)
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    fn assert_rot(rot: Rot, pitch: f32, yaw: f32, roll: f32) {
        assert!(
            approx_eq(rot.pitch, pitch) && approx_eq(rot.yaw, yaw) && approx_eq(rot.roll, roll),
            "got {:?}, expected p={} y={} r={}",
            rot,
            pitch,
            yaw,
            roll
        );
    }

    // Tポーズ: xy平面、背骨はy軸、腰幅=肩幅
    const L_HIP: [f32; 3] = [-1.0, 0.0, 0.0];
    const R_HIP: [f32; 3] = [1.0, 0.0, 0.0];

    fn hips() -> (Vector3<f32>, Vector3<f32>) {
        (Vector3::from(L_HIP), Vector3::from(R_HIP))
    }

    #[test]
    fn test_spine_t_pose() {
        let (lh, rh) = hips();
        let rot = calc_spine(&lh, &rh, &v(-1.0, 1.0, 0.0), &v(1.0, 1.0, 0.0));
        assert_rot(rot, 0.0, 0.0, 0.0);
    }

    #[test]
    fn test_spine_twist() {
        let (lh, rh) = hips();
        // 左肩が手前、右肩が奥: x幅 = z幅 = 2
        let rot = calc_spine(&lh, &rh, &v(-1.0, 1.0, 1.0), &v(1.0, 1.0, -1.0));
        assert_rot(rot, 0.0, -FRAC_PI_4, 0.0);

        let rot = calc_spine(&lh, &rh, &v(-1.0, 1.0, -1.0), &v(1.0, 1.0, 1.0));
        assert_rot(rot, 0.0, FRAC_PI_4, 0.0);
    }

    #[test]
    fn test_spine_tilted_shoulders() {
        let (lh, rh) = hips();
        let rot = calc_spine(&lh, &rh, &v(-1.0, 0.0, 0.0), &v(1.0, 2.0, 0.0));
        assert_rot(rot, 0.0, 0.0, -FRAC_PI_4);

        let rot = calc_spine(&lh, &rh, &v(-1.0, 2.0, 0.0), &v(1.0, 0.0, 0.0));
        assert_rot(rot, 0.0, 0.0, FRAC_PI_4);
    }

    #[test]
    fn test_spine_forward_lean() {
        let (lh, rh) = hips();
        // 肩が z- 方向に 45° 傾く
        let rot = calc_spine(&lh, &rh, &v(-1.0, 1.0, -1.0), &v(1.0, 1.0, -1.0));
        assert_rot(rot, FRAC_PI_4, 0.0, 0.0);
    }

    #[test]
    fn test_bone_colinear_is_zero() {
        let rot = plain_bone(&v(0.0, 0.0, 0.0), &v(1.0, 0.0, 0.0), &v(2.0, 0.0, 0.0));
        assert_rot(rot, 0.0, 0.0, 0.0);
    }

    #[test]
    fn test_bone_right_angle_up() {
        let rot = plain_bone(&v(0.0, 0.0, 0.0), &v(1.0, 0.0, 0.0), &v(1.0, 1.0, 0.0));
        assert_rot(rot, FRAC_PI_2, 0.0, FRAC_PI_2);
    }

    #[test]
    fn test_bone_horizontal_turn() {
        let rot = plain_bone(&v(0.0, 0.0, 0.0), &v(1.0, 0.0, 0.0), &v(1.0, 0.0, 1.0));
        assert_rot(rot, 0.0, FRAC_PI_2, FRAC_PI_2);
    }

    #[test]
    fn test_bone_offset_then_scale() {
        let rot = calc_bone(
            &v(0.0, 0.0, 0.0),
            &v(1.0, 0.0, 0.0),
            &v(1.0, 1.0, 0.0),
            Rot::new(0.5, 0.0, -FRAC_PI_2),
            Rot::new(2.0, 1.0, -1.0),
        );
        assert_rot(rot, (FRAC_PI_2 + 0.5) * 2.0, 0.0, 0.0);
    }

    #[test]
    fn test_bone_coincident_joints_is_finite() {
        // 参照骨が長さ 0: 参照側の角度は 0 として扱う
        let p = v(0.5, 0.5, 0.0);
        let rot = plain_bone(&p, &p, &v(1.0, 0.0, 0.0));
        assert_rot(rot, -FRAC_PI_4, 0.0, 0.0);
    }

    #[test]
    fn test_spine_stacked_hips_is_finite() {
        // 横向きに寝た姿勢: 腰が同じ x, z で上下に並ぶ
        let rot = calc_spine(
            &v(0.0, 0.0, 0.0),
            &v(0.0, 1.0, 0.0),
            &v(-1.0, -1.0, 0.0),
            &v(1.0, -1.0, 0.0),
        );
        assert_rot(rot, 0.0, 0.0, 0.0);
    }

    #[test]
    fn test_extrapolated_endpoints() {
        let e = Extrapolated::default();
        let end = e.forearm_end(&v(0.0, 0.0, 0.0), &v(1.0, 2.0, 3.0));
        assert_eq!(end, v(2.0, 4.0, 6.0));
        let foot = e.foot_end(&v(0.0, 0.0, 0.0), &v(1.0, 1.0, 1.0));
        assert!(approx_eq(foot.y, 0.9));
    }

    #[test]
    fn test_head_rest_pose_is_zero() {
        let rotation = skeletal_rotation(&standing_person()).unwrap();
        assert_rot(rotation.head, 0.0, 0.0, 0.0);
    }

    #[test]
    fn test_standing_person_neck_and_arms() {
        let rotation = skeletal_rotation(&standing_person()).unwrap();
        // 腰→肩→耳 は一直線
        assert_rot(rotation.neck, 0.0, 0.0, 0.0);
        // 肩→肘→手首 は水平に一直線
        assert_rot(rotation.left_upper_arm, 0.0, 0.0, 0.0);
        assert_rot(rotation.right_upper_arm, 0.0, 0.0, 0.0);
        // 延長した終点なので前腕は常に一直線
        assert_rot(rotation.left_forearm, 0.0, 0.0, 0.0);
        // 腰→膝→足首 も一直線
        assert_rot(rotation.left_upper_leg, 0.0, 0.0, 0.0);
        assert!(rotation.iter().all(|(_, rot)| rot.is_finite()));
    }

    #[test]
    fn test_missing_landmark_fails() {
        let truncated = LandmarkSet::new(standing_person().landmarks()[..20].to_vec());
        assert!(matches!(
            skeletal_rotation(&truncated),
            Err(MocapError::MissingLandmark { .. })
        ));
    }

    #[test]
    fn test_coincident_landmarks_still_produce_pose() {
        let lms = vec![Landmark::new(0.5, 0.5, 0.0, 1.0); LandmarkIndex::COUNT];
        let rotation = skeletal_rotation(&LandmarkSet::new(lms)).unwrap();
        assert!(rotation.iter().all(|(_, rot)| rot.is_finite()));
    }

    #[test]
    fn test_foot_on_ankle_keeps_person() {
        let mut lms = standing_person().landmarks().to_vec();
        lms[LandmarkIndex::LeftFootIndex as usize] = lms[LandmarkIndex::LeftAnkle as usize];
        let poses = compute_poses(&[LandmarkSet::new(lms)], &Extrapolated::default(), false);
        assert_eq!(poses.len(), 1);
        assert!(poses[0].skeletal_rotation.left_foot.is_finite());
    }

    #[test]
    fn test_stacked_hips_keeps_person() {
        let mut lms = standing_person().landmarks().to_vec();
        let left_hip = lms[LandmarkIndex::LeftHip as usize];
        lms[LandmarkIndex::RightHip as usize] = Landmark::new(left_hip.x, 0.75, left_hip.z, 1.0);
        let poses = compute_poses(&[LandmarkSet::new(lms)], &Extrapolated::default(), false);
        assert_eq!(poses.len(), 1);
        assert!(poses[0].skeletal_rotation.spine.is_finite());
    }

    #[test]
    fn test_overflowing_bone_fails() {
        // 有限だが差が溢れる座標: 方向が NaN になる
        let mut lms = standing_person().landmarks().to_vec();
        lms[LandmarkIndex::LeftElbow as usize] = Landmark::new(-f32::MAX, 0.25, 0.0, 1.0);
        lms[LandmarkIndex::LeftWrist as usize] = Landmark::new(f32::MAX, 0.25, 0.0, 1.0);
        assert!(matches!(
            skeletal_rotation(&LandmarkSet::new(lms)),
            Err(MocapError::DegenerateBone { .. })
        ));
    }

    #[test]
    fn test_shoulder_bones_left_and_right() {
        let rotation = skeletal_rotation(&asymmetric_person()).unwrap();
        // 肩中点→左肩→左肘: 水平左向きから真上へ
        assert_rot(rotation.left_shoulder, -FRAC_PI_2, -PI, FRAC_PI_2);
        // 右腕は水平のまま
        assert_rot(rotation.right_shoulder, 0.0, 0.0, 0.0);
        assert_rot(rotation.right_upper_arm, 0.0, 0.0, 0.0);
    }

    #[test]
    fn test_leg_bones_left_and_right() {
        let rotation = skeletal_rotation(&asymmetric_person()).unwrap();
        // 腰→右膝→右足首: 真下から前 (z-) へ
        assert_rot(rotation.right_upper_leg, -FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2);
        assert_rot(rotation.left_upper_leg, 0.0, 0.0, 0.0);
        // 右膝→右足首→右つま先: 前向きから真下へ
        assert_rot(rotation.right_lower_leg, FRAC_PI_2, FRAC_PI_2, FRAC_PI_2);
    }

    #[test]
    fn test_lower_leg_uses_foot_index() {
        let rotation = skeletal_rotation(&standing_person()).unwrap();
        // 膝→足首 は真下、足首→つま先 は下前方 45°
        assert_rot(rotation.left_lower_leg, -FRAC_PI_4, -FRAC_PI_2, FRAC_PI_4);
        assert_rot(rotation.right_lower_leg, -FRAC_PI_4, -FRAC_PI_2, FRAC_PI_4);
    }

    #[test]
    fn test_compute_poses_isolates_failures() {
        let broken = LandmarkSet::new(vec![Landmark::default(); 10]);
        let people = vec![standing_person(), broken, standing_person()];
        let poses = compute_poses(&people, &Extrapolated::default(), false);
        assert_eq!(poses.len(), 2);
        assert!(poses[0].debug.is_empty());
    }

    #[test]
    fn test_compute_poses_empty_set_is_no_person() {
        let poses = compute_poses(&[LandmarkSet::empty()], &Extrapolated::default(), false);
        assert!(poses.is_empty());
    }

    #[test]
    fn test_compute_poses_debug_lines() {
        let poses = compute_poses(&[standing_person()], &Extrapolated::default(), true);
        assert_eq!(poses[0].debug.len(), Bone::COUNT);
        assert!(poses[0].debug[2].starts_with("spine:"));
    }

    struct Straight;

    impl EndpointHeuristic for Straight {
        fn forearm_end(&self, _elbow: &Vector3<f32>, wrist: &Vector3<f32>) -> Vector3<f32> {
            wrist + Vector3::new(0.0, -0.1, 0.0)
        }

        fn foot_end(&self, ankle: &Vector3<f32>, foot_index: &Vector3<f32>) -> Vector3<f32> {
            foot_index + (foot_index - ankle)
        }
    }

    #[test]
    fn test_endpoint_heuristic_replaceable() {
        let rotation = skeletal_rotation_with(&standing_person(), &Straight).unwrap();
        // 手首から真上への終点: 水平な前腕に対して 90°
        assert!(approx_eq(rotation.left_forearm.roll, FRAC_PI_2));
        // 左は -x 向き、右は +x 向きの前腕なので yaw だけが異なる
        assert_rot(rotation.left_forearm, -FRAC_PI_2, -PI, FRAC_PI_2);
        assert_rot(rotation.right_forearm, -FRAC_PI_2, 0.0, FRAC_PI_2);
        assert!(approx_eq(rotation.get(Bone::LeftFoot).roll, 0.0));
    }
}
