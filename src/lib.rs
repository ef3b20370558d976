pub mod cache;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod pose;
pub mod render;
pub mod stats;
pub mod telemetry;
pub mod tracker;

pub use error::{MocapError, Result};
pub use pipeline::{FrameTicket, PoseSystem};
