pub mod detector;
pub mod landmark;
pub mod replay;
pub mod rot;
pub mod skeleton;

pub use detector::{DetectorOptions, DetectorSession, PoseDetector};
pub use landmark::{lerp, mid_point, Landmark, LandmarkIndex, LandmarkSet};
pub use replay::{ReplayDetector, ReplayFrame};
pub use rot::Rot;
pub use skeleton::{Bone, Pose, SkeletalRotation};
