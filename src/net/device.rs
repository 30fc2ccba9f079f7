//! 无线网络设备
//!
//! 设备安装在节点上，类别必须与节点类别对应；PHY 参数由无线引擎统一持有。

use super::id::{DeviceId, NodeId};
use super::node::NodeKind;
use serde::{Deserialize, Serialize};

/// 设备类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// 锚点宏基站（LTE eNB）
    Anchor,
    /// 高频小基站（mmWave eNB）
    SmallCell,
    /// 终端（双连接 UE）
    Terminal,
}

impl DeviceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceKind::Anchor => "anchor",
            DeviceKind::SmallCell => "small cell",
            DeviceKind::Terminal => "terminal",
        }
    }

    /// 该类设备要求的节点类别
    pub fn node_kind(self) -> NodeKind {
        match self {
            DeviceKind::Anchor => NodeKind::AnchorCell,
            DeviceKind::SmallCell => NodeKind::SmallCell,
            DeviceKind::Terminal => NodeKind::Terminal,
        }
    }
}

/// 路径损耗模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathlossModel {
    #[default]
    #[serde(rename = "3gpp_umi_street_canyon")]
    ThreeGppUmiStreetCanyon,
    #[serde(rename = "3gpp_uma")]
    ThreeGppUma,
    #[serde(rename = "3gpp_rma")]
    ThreeGppRma,
}

/// 信道状态（LOS/NLOS）模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelConditionModel {
    #[default]
    #[serde(rename = "3gpp_umi_street_canyon")]
    ThreeGppUmiStreetCanyon,
    #[serde(rename = "3gpp_uma")]
    ThreeGppUma,
    #[serde(rename = "3gpp_rma")]
    ThreeGppRma,
    AlwaysLos,
}

/// PHY 参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhyConfig {
    pub bandwidth_hz: f64,
    pub center_frequency_hz: f64,
    pub pathloss: PathlossModel,
    pub channel_condition: ChannelConditionModel,
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self {
            bandwidth_hz: 20e6,
            center_frequency_hz: 3.5e9,
            pathloss: PathlossModel::default(),
            channel_condition: ChannelConditionModel::default(),
        }
    }
}

/// 已安装的设备
#[derive(Debug, Clone)]
pub struct Device {
    pub id: DeviceId,
    pub node: NodeId,
    pub kind: DeviceKind,
}
