//! 场景模块
//!
//! 配置、驱动流程与布局快照。

mod config;
mod driver;
mod layout;

pub use config::ScenarioConfig;
pub use driver::{PreparedScenario, ScenarioDriver, ScenarioOutcome, seeded_rng};
pub use layout::{Placement, ScenarioLayout};
