use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{MocapError, Result};

/// BlazePose の 33 ランドマークインデックス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl LandmarkIndex {
    pub const COUNT: usize = 33;

    pub fn from_index(index: usize) -> Option<Self> {
        use LandmarkIndex::*;
        let idx = match index {
            0 => Nose,
            1 => LeftEyeInner,
            2 => LeftEye,
            3 => LeftEyeOuter,
            4 => RightEyeInner,
            5 => RightEye,
            6 => RightEyeOuter,
            7 => LeftEar,
            8 => RightEar,
            9 => MouthLeft,
            10 => MouthRight,
            11 => LeftShoulder,
            12 => RightShoulder,
            13 => LeftElbow,
            14 => RightElbow,
            15 => LeftWrist,
            16 => RightWrist,
            17 => LeftPinky,
            18 => RightPinky,
            19 => LeftIndex,
            20 => RightIndex,
            21 => LeftThumb,
            22 => RightThumb,
            23 => LeftHip,
            24 => RightHip,
            25 => LeftKnee,
            26 => RightKnee,
            27 => LeftAnkle,
            28 => RightAnkle,
            29 => LeftHeel,
            30 => RightHeel,
            31 => LeftFootIndex,
            32 => RightFootIndex,
            _ => return None,
        };
        Some(idx)
    }
}

/// 単一ランドマーク
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    /// 正規化されたX座標 (0.0〜1.0)
    pub x: f32,
    /// 正規化されたY座標 (0.0〜1.0、下向きが正)
    pub y: f32,
    /// 相対深度（腰中心基準、カメラに近いほど負）
    pub z: f32,
    /// 可視度 (0.0〜1.0)
    #[serde(default)]
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// 可視度が閾値以上か
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility >= threshold
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn position(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// 可視度も含めた成分ごとの中点
pub fn mid_point(a: &Landmark, b: &Landmark) -> Landmark {
    Landmark {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
        z: (a.z + b.z) / 2.0,
        visibility: (a.visibility + b.visibility) / 2.0,
    }
}

/// s=0 で a、s=1 で b を返す線形補間
pub fn lerp(s: f32, a: &Landmark, b: &Landmark) -> Landmark {
    Landmark {
        x: (b.x - a.x) * s + a.x,
        y: (b.y - a.y) * s + a.y,
        z: (b.z - a.z) * s + a.z,
        visibility: (b.visibility - a.visibility) * s + a.visibility,
    }
}

/// 1人分のランドマーク列
///
/// 検出器の出力をそのまま保持するため長さは強制しない。
/// 欠けたインデックスは [`LandmarkSet::get`] がエラーとして返す。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    landmarks: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// 人物なしを表す空の集合
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// 全 33 インデックスが揃っているか
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= LandmarkIndex::COUNT
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Landmark> {
        self.landmarks.iter()
    }

    pub fn get(&self, index: LandmarkIndex) -> Result<&Landmark> {
        let i = index as usize;
        self.landmarks.get(i).ok_or(MocapError::MissingLandmark {
            index: i,
            len: self.landmarks.len(),
        })
    }

    /// 有限座標を持つランドマークの3D位置
    pub fn point(&self, index: LandmarkIndex) -> Result<Vector3<f32>> {
        let landmark = self.get(index)?;
        if !landmark.is_finite() {
            return Err(MocapError::MalformedLandmark {
                index: index as usize,
            });
        }
        Ok(landmark.position())
    }

    /// 2点の中点の3D位置
    pub fn mid(&self, a: LandmarkIndex, b: LandmarkIndex) -> Result<Vector3<f32>> {
        Ok((self.point(a)? + self.point(b)?) * 0.5)
    }
}

impl From<Vec<Landmark>> for LandmarkSet {
    fn from(landmarks: Vec<Landmark>) -> Self {
        Self::new(landmarks)
    }
}

impl FromIterator<Landmark> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = Landmark>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
