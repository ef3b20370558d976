use serde::{Deserialize, Serialize};

/// 参照骨に対する対象骨の回転（ラジアン）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rot {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rot {
    pub const ZERO: Rot = Rot {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    pub const UNIT: Rot = Rot {
        pitch: 1.0,
        yaw: 1.0,
        roll: 1.0,
    };

    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// 軸ごとに offset を加算してから scale を乗算
    pub fn offset_scale(self, offset: Rot, scale: Rot) -> Rot {
        Rot {
            pitch: (self.pitch + offset.pitch) * scale.pitch,
            yaw: (self.yaw + offset.yaw) * scale.yaw,
            roll: (self.roll + offset.roll) * scale.roll,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.pitch.is_finite() && self.yaw.is_finite() && self.roll.is_finite()
    }

    pub fn to_degrees(self) -> Rot {
        Rot {
            pitch: self.pitch.to_degrees(),
            yaw: self.yaw.to_degrees(),
            roll: self.roll.to_degrees(),
        }
    }
}
