use super::ring::RingStat;
use crate::pose::Rot;

/// Per-axis rolling statistics of a [`Rot`] stream.
#[derive(Debug, Clone)]
pub struct RotStat {
    pitch: RingStat,
    yaw: RingStat,
    roll: RingStat,
}

impl RotStat {
    pub fn new(capacity: usize) -> Self {
        Self {
            pitch: RingStat::new(capacity),
            yaw: RingStat::new(capacity),
            roll: RingStat::new(capacity),
        }
    }

    pub fn push(&mut self, rot: Rot) {
        self.pitch.push(rot.pitch as f64);
        self.yaw.push(rot.yaw as f64);
        self.roll.push(rot.roll as f64);
    }

    pub fn len(&self) -> usize {
        self.pitch.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitch.is_empty()
    }

    pub fn mean(&self) -> Rot {
        Rot::new(
            self.pitch.mean() as f32,
            self.yaw.mean() as f32,
            self.roll.mean() as f32,
        )
    }

    pub fn min(&self) -> Rot {
        Rot::new(
            self.pitch.min() as f32,
            self.yaw.min() as f32,
            self.roll.min() as f32,
        )
    }

    pub fn max(&self) -> Rot {
        Rot::new(
            self.pitch.max() as f32,
            self.yaw.max() as f32,
            self.roll.max() as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axes_tracked_independently() {
        let mut stat = RotStat::new(8);
        stat.push(Rot::new(0.0, 1.0, -2.0));
        stat.push(Rot::new(1.0, 3.0, 2.0));

        let mean = stat.mean();
        assert!((mean.pitch - 0.5).abs() < 1e-6);
        assert!((mean.yaw - 2.0).abs() < 1e-6);
        assert!(mean.roll.abs() < 1e-6);
        assert_eq!(stat.min(), Rot::new(0.0, 1.0, -2.0));
        assert_eq!(stat.max(), Rot::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_empty_is_nan() {
        let stat = RotStat::new(4);
        assert!(stat.is_empty());
        assert!(!stat.mean().is_finite());
    }
}
