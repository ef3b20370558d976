pub mod perf;
pub mod ring;
pub mod rot;

pub use perf::{PerfStats, PerfTime};
pub use ring::RingStat;
pub use rot::RotStat;
