use crate::pose::{lerp, Landmark, LandmarkSet};

/// 平滑化係数の上限。1.0 だと前フレームに固定されて動かなくなる。
pub const MAX_SMOOTHING: f32 = 0.999;

/// 前フレームとの線形補間によるランドマーク平滑化フィルタ
///
/// 係数 s は前フレーム側への重み: `lerp(s, new, prev)`。
/// 人数が前フレームと異なる場合や s == 0 の場合は平滑化せずそのまま通す。
pub struct Smoother {
    prev: Option<Vec<LandmarkSet>>,
}

impl Smoother {
    pub fn new() -> Self {
        Self { prev: None }
    }

    pub fn apply(&mut self, current: &[LandmarkSet], smoothing: f32) -> Vec<LandmarkSet> {
        // 人物なし: 姿勢をクリアし、次フレームの補間元にもしない
        if current.is_empty() {
            self.prev = None;
            return vec![LandmarkSet::empty()];
        }

        let s = smoothing.clamp(0.0, MAX_SMOOTHING);
        let result: Vec<LandmarkSet> = match self.prev.as_deref() {
            Some(prev) if prev.len() == current.len() && s > 0.0 => current
                .iter()
                .zip(prev)
                .map(|(new, old)| blend(s, new, old))
                .collect(),
            _ => current.to_vec(),
        };

        self.prev = Some(result.clone());
        result
    }

    pub fn reset(&mut self) {
        self.prev = None;
    }
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new()
    }
}

/// 1人分の補間。長さが異なる場合、片側にしかない点は
/// 前フレームの値（無ければ今フレームの値）をそのまま使う。
fn blend(s: f32, new: &LandmarkSet, old: &LandmarkSet) -> LandmarkSet {
    let len = new.len().max(old.len());
    (0..len)
        .filter_map(|i| {
            let n: Option<&Landmark> = new.landmarks().get(i);
            let o: Option<&Landmark> = old.landmarks().get(i);
            match (n, o) {
                (Some(n), Some(o)) => Some(lerp(s, n, o)),
                (None, Some(o)) => Some(*o),
                (Some(n), None) => Some(*n),
                (None, None) => None,
            }
        })
        .collect()
}
