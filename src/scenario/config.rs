//! 场景配置
//!
//! 所有字段都有默认值，默认值即内置场景：10 个小基站、50 个终端、
//! 100 km × 100 km 区域、运行 5 秒。可从 JSON 读取，缺省字段取默认值。

use std::path::Path;

use crate::error::ConfigError;
use crate::mobility::TerminalMobility;
use crate::net::PhyConfig;
use crate::sim::SimTime;
use crate::topo::{Area, GridLayout};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// 仿真时长（秒）
    pub sim_time_s: f64,
    pub small_cells: usize,
    pub terminals: usize,
    pub area: Area,
    pub grid: GridLayout,
    pub mobility: TerminalMobility,
    pub phy: PhyConfig,
    /// 随机种子：只影响终端初始位置、游走轨迹与绑定，不影响基站网格
    pub seed: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            sim_time_s: 5.0,
            small_cells: 10,
            terminals: 50,
            area: Area::default(),
            grid: GridLayout::default(),
            mobility: TerminalMobility::default(),
            phy: PhyConfig::default(),
            seed: 1,
        }
    }
}

impl ScenarioConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// 在任何节点创建之前检查全部参数
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.area.is_valid() {
            return Err(ConfigError::InvalidArea {
                max_x: self.area.max_x,
                max_y: self.area.max_y,
            });
        }
        self.grid.validate()?;
        self.mobility.validate()?;
        if !(self.sim_time_s.is_finite() && self.sim_time_s > 0.0) {
            return Err(ConfigError::InvalidDuration(self.sim_time_s));
        }
        if self.small_cells == 0 && self.terminals > 0 {
            return Err(ConfigError::NoSmallCells {
                terminals: self.terminals,
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> SimTime {
        SimTime::from_secs_f64(self.sim_time_s)
    }
}
