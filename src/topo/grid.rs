//! 网格拓扑构建
//!
//! 锚点宏基站位于区域几何中心；小基站 `i` 放在
//! `(x0 + (i mod K)·W, y0 + (i div K)·W)`。纯函数：相同输入总得到相同拓扑，
//! 与随机种子无关。

use super::position::{Area, Position};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// 网格布局参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// 第一个小基站的 x 坐标
    pub origin_x: f64,
    /// 第一个小基站的 y 坐标
    pub origin_y: f64,
    /// 行列间距 W（米）
    pub spacing: f64,
    /// 每行基站数 K
    pub row_width: usize,
    /// 天线高度（所有基站共用）
    pub antenna_height: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            origin_x: 20_000.0,
            origin_y: 20_000.0,
            spacing: 30_000.0,
            row_width: 3,
            antenna_height: 3.0,
        }
    }
}

impl GridLayout {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.row_width == 0 {
            return Err(ConfigError::ZeroRowWidth);
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(ConfigError::InvalidGridSpacing(self.spacing));
        }
        if !(self.origin_x.is_finite() && self.origin_y.is_finite()) {
            return Err(ConfigError::InvalidGridOrigin {
                x: self.origin_x,
                y: self.origin_y,
            });
        }
        if !(self.antenna_height.is_finite() && self.antenna_height >= 0.0) {
            return Err(ConfigError::InvalidAntennaHeight(self.antenna_height));
        }
        Ok(())
    }

    /// 第 `i` 个小基站的位置
    pub fn slot(&self, i: usize) -> Position {
        let col = (i % self.row_width) as f64;
        let row = (i / self.row_width) as f64;
        Position::new(
            self.origin_x + col * self.spacing,
            self.origin_y + row * self.spacing,
            self.antenna_height,
        )
    }
}

/// 基站拓扑：一个锚点加 N 个小基站
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellTopology {
    pub anchor: Position,
    pub small_cells: Vec<Position>,
}

impl CellTopology {
    /// 基站位置总数（N + 1）
    pub fn len(&self) -> usize {
        self.small_cells.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// 锚点在前、小基站按下标在后
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.anchor).chain(self.small_cells.iter().copied())
    }
}

/// 构建基站拓扑
///
/// `small_cells = 0` 时只有锚点；是否允许这种配置由调用方（绑定策略）判定。
pub fn build_topology(
    small_cells: usize,
    area: Area,
    layout: &GridLayout,
) -> Result<CellTopology, ConfigError> {
    if !area.is_valid() {
        return Err(ConfigError::InvalidArea {
            max_x: area.max_x,
            max_y: area.max_y,
        });
    }
    layout.validate()?;

    let small_cells: Vec<Position> = (0..small_cells).map(|i| layout.slot(i)).collect();
    // 间距过大时行列相乘可能溢出
    if small_cells.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(ConfigError::InvalidGridSpacing(layout.spacing));
    }
    Ok(CellTopology {
        anchor: area.center(layout.antenna_height),
        small_cells,
    })
}
