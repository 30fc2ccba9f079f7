//! 移动配置
//!
//! 以类型化结构列出可识别的选项：运动模型类别、速度区间、边界矩形。

use crate::error::ConfigError;
use crate::topo::{Rectangle, sampleable};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 速度区间（米/秒），闭区间均匀采样
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

impl SpeedRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if !ok(self.min) || !ok(self.max) || !sampleable(self.min, self.max) {
            return Err(ConfigError::InvalidSpeed {
                min: self.min,
                max: self.max,
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedSpeedRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self::new(5.0, 10.0)
    }
}

/// 二维随机游走参数：每一段随机选取速度与方向，走完 `leg_distance` 米后重新选取；
/// 碰到边界时沿法向反射。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WalkProfile {
    pub speed: SpeedRange,
    pub bounds: Rectangle,
    pub leg_distance: f64,
}

/// 运动模型类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionKind {
    Static,
    RandomWalk,
}

/// 节点的移动配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MobilityProfile {
    Static,
    RandomWalk(WalkProfile),
}

impl MobilityProfile {
    pub fn kind(&self) -> MotionKind {
        match self {
            MobilityProfile::Static => MotionKind::Static,
            MobilityProfile::RandomWalk(_) => MotionKind::RandomWalk,
        }
    }
}

/// 终端移动参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalMobility {
    /// 终端高度（米）
    pub height: f64,
    pub speed: SpeedRange,
    /// 随机游走每段距离（米）
    pub leg_distance: f64,
}

impl Default for TerminalMobility {
    fn default() -> Self {
        Self {
            height: 1.5,
            speed: SpeedRange::default(),
            leg_distance: 1.0,
        }
    }
}

impl TerminalMobility {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.height.is_finite() && self.height >= 0.0) {
            return Err(ConfigError::InvalidTerminalHeight(self.height));
        }
        self.speed.validate()?;
        if !(self.leg_distance.is_finite() && self.leg_distance > 0.0) {
            return Err(ConfigError::InvalidLegDistance(self.leg_distance));
        }
        Ok(())
    }
}
