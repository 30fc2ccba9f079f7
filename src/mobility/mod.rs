//! 移动模块
//!
//! 移动配置、随机游走与移动模型登记。

mod configurator;
mod models;
mod profile;
mod random_walk;

#[cfg(test)]
pub(crate) use random_walk::RandomWalk;

pub use configurator::{configure_cells, configure_terminals};
pub use models::{MobilityEngine, MobilityHost, MobilityModels};
pub use profile::{MobilityProfile, MotionKind, SpeedRange, TerminalMobility, WalkProfile};
