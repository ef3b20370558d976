pub mod skeleton;

pub use skeleton::{spine_stick, sticks, Stick, STICK_CONNECTIONS};
