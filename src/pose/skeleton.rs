use serde::Serialize;

use super::rot::Rot;

/// 回転を算出する骨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Bone {
    Head,
    Neck,
    Spine,
    LeftShoulder,
    RightShoulder,
    LeftUpperArm,
    RightUpperArm,
    LeftForearm,
    RightForearm,
    LeftUpperLeg,
    RightUpperLeg,
    LeftLowerLeg,
    RightLowerLeg,
    LeftFoot,
    RightFoot,
}

impl Bone {
    pub const COUNT: usize = 15;

    pub const ALL: [Bone; Bone::COUNT] = [
        Bone::Head,
        Bone::Neck,
        Bone::Spine,
        Bone::LeftShoulder,
        Bone::RightShoulder,
        Bone::LeftUpperArm,
        Bone::RightUpperArm,
        Bone::LeftForearm,
        Bone::RightForearm,
        Bone::LeftUpperLeg,
        Bone::RightUpperLeg,
        Bone::LeftLowerLeg,
        Bone::RightLowerLeg,
        Bone::LeftFoot,
        Bone::RightFoot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Bone::Head => "head",
            Bone::Neck => "neck",
            Bone::Spine => "spine",
            Bone::LeftShoulder => "left_shoulder",
            Bone::RightShoulder => "right_shoulder",
            Bone::LeftUpperArm => "left_upper_arm",
            Bone::RightUpperArm => "right_upper_arm",
            Bone::LeftForearm => "left_forearm",
            Bone::RightForearm => "right_forearm",
            Bone::LeftUpperLeg => "left_upper_leg",
            Bone::RightUpperLeg => "right_upper_leg",
            Bone::LeftLowerLeg => "left_lower_leg",
            Bone::RightLowerLeg => "right_lower_leg",
            Bone::LeftFoot => "left_foot",
            Bone::RightFoot => "right_foot",
        }
    }
}

/// 1人分の全骨の回転
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SkeletalRotation {
    /// 頭中心 → 鼻
    pub head: Rot,
    /// 肩中点 → 耳中点
    pub neck: Rot,
    /// 腰中点 → 肩中点
    pub spine: Rot,
    pub left_shoulder: Rot,
    pub right_shoulder: Rot,
    pub left_upper_arm: Rot,
    pub right_upper_arm: Rot,
    pub left_forearm: Rot,
    pub right_forearm: Rot,
    pub left_upper_leg: Rot,
    pub right_upper_leg: Rot,
    pub left_lower_leg: Rot,
    pub right_lower_leg: Rot,
    pub left_foot: Rot,
    pub right_foot: Rot,
}

impl SkeletalRotation {
    pub fn get(&self, bone: Bone) -> Rot {
        match bone {
            Bone::Head => self.head,
            Bone::Neck => self.neck,
            Bone::Spine => self.spine,
            Bone::LeftShoulder => self.left_shoulder,
            Bone::RightShoulder => self.right_shoulder,
            Bone::LeftUpperArm => self.left_upper_arm,
            Bone::RightUpperArm => self.right_upper_arm,
            Bone::LeftForearm => self.left_forearm,
            Bone::RightForearm => self.right_forearm,
            Bone::LeftUpperLeg => self.left_upper_leg,
            Bone::RightUpperLeg => self.right_upper_leg,
            Bone::LeftLowerLeg => self.left_lower_leg,
            Bone::RightLowerLeg => self.right_lower_leg,
            Bone::LeftFoot => self.left_foot,
            Bone::RightFoot => self.right_foot,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bone, Rot)> + '_ {
        Bone::ALL.into_iter().map(move |bone| (bone, self.get(bone)))
    }
}

/// 1人分の姿勢。キャッシュ再計算ごとに新規生成され、以後変更されない。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pose {
    pub skeletal_rotation: SkeletalRotation,
    pub debug: Vec<String>,
}

impl Pose {
    pub fn new(skeletal_rotation: SkeletalRotation) -> Self {
        Self {
            skeletal_rotation,
            debug: Vec::new(),
        }
    }

    /// 骨ごとの回転を度数で1行ずつ書き出したデバッグ行を付与
    pub fn with_debug_lines(mut self) -> Self {
        self.debug = self
            .skeletal_rotation
            .iter()
            .map(|(bone, rot)| {
                let deg = rot.to_degrees();
                format!(
                    "{}: p={:.0} y={:.0} r={:.0}",
                    bone.name(),
                    deg.pitch,
                    deg.yaw,
                    deg.roll
                )
            })
            .collect();
        self
    }
}
