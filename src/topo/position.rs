//! 几何类型
//!
//! 三维坐标（米）与二维矩形边界。

use serde::{Deserialize, Serialize};

/// 三维坐标（米）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 水平面距离
    pub fn distance_2d(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// 仿真区域 `[0, max_x] × [0, max_y]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub max_x: f64,
    pub max_y: f64,
}

impl Area {
    pub const fn new(max_x: f64, max_y: f64) -> Self {
        Self { max_x, max_y }
    }

    /// 两个维度都为正且有限，并且 `[0, max]` 可以均匀采样
    pub fn is_valid(&self) -> bool {
        [self.max_x, self.max_y]
            .iter()
            .all(|&v| v > 0.0 && sampleable(0.0, v))
    }

    /// 几何中心（给定高度）
    pub fn center(&self, z: f64) -> Position {
        Position::new(self.max_x / 2.0, self.max_y / 2.0, z)
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle {
            min_x: 0.0,
            max_x: self.max_x,
            min_y: 0.0,
            max_y: self.max_y,
        }
    }
}

impl Default for Area {
    fn default() -> Self {
        Self::new(100_000.0, 100_000.0)
    }
}

/// 闭区间 `[low, high]` 的宽度经 `Uniform::new_inclusive` 缩放后仍有限
pub(crate) fn sampleable(low: f64, high: f64) -> bool {
    low.is_finite() && high.is_finite() && ((high - low) / (1.0 - f64::EPSILON)).is_finite()
}

/// 水平面矩形边界
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Rectangle {
    pub fn contains(&self, p: &Position) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_y..=self.max_y).contains(&p.y)
    }

    /// 把水平坐标夹到边界内，高度不变
    pub fn clamp(&self, p: Position) -> Position {
        Position::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y.clamp(self.min_y, self.max_y),
            p.z,
        )
    }
}
