pub mod body;
pub mod identity;
pub mod smooth;

#[cfg(test)]
pub(crate) mod fixtures;

pub use body::{
    calc_bone, calc_spine, compute_poses, skeletal_rotation, skeletal_rotation_with,
    EndpointHeuristic, Extrapolated,
};
pub use identity::stabilize_order;
pub use smooth::{Smoother, MAX_SMOOTHING};
