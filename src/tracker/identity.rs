use crate::pose::{LandmarkIndex, LandmarkSet};

/// 複数人の並びをフレーム間で安定させる
///
/// 左側の肩のX座標で昇順に並べ替え、画面左の人物を常に index 0 にする。
/// 人物が左右に入れ替わらない前提のヒューリスティックで、追跡ではない。
/// 肩が欠けた集合は末尾に回す（安定ソートなので元の順序を保つ）。
pub fn stabilize_order(mut people: Vec<LandmarkSet>) -> Vec<LandmarkSet> {
    people.sort_by(|a, b| anchor_x(a).total_cmp(&anchor_x(b)));
    people
}

/// 並べ替えのキー: min(左肩.x, 右肩.x)
fn anchor_x(set: &LandmarkSet) -> f32 {
    match (
        set.get(LandmarkIndex::LeftShoulder),
        set.get(LandmarkIndex::RightShoulder),
    ) {
        (Ok(left), Ok(right)) if left.x.is_finite() && right.x.is_finite() => left.x.min(right.x),
        _ => f32::INFINITY,
    }
}
