//! 错误类型
//!
//! 场景构建过程中的两类错误：配置错误（在任何仿真时间推进之前致命失败）
//! 与协作组件错误（外部安装/分配调用失败，原样向上传播）。

use crate::net::{DeviceId, NodeId};
use std::path::PathBuf;
use thiserror::Error;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no small cells configured but {terminals} terminal(s) require attachment")]
    NoSmallCells { terminals: usize },

    #[error("area dimensions must be positive and finite, got {max_x} x {max_y}")]
    InvalidArea { max_x: f64, max_y: f64 },

    #[error("speed range is inverted: min {min} > max {max}")]
    InvertedSpeedRange { min: f64, max: f64 },

    #[error("speeds must be finite and non-negative, got [{min}, {max}]")]
    InvalidSpeed { min: f64, max: f64 },

    #[error("terminal height must be finite and non-negative, got {0}")]
    InvalidTerminalHeight(f64),

    #[error("grid origin must be finite, got ({x}, {y})")]
    InvalidGridOrigin { x: f64, y: f64 },

    #[error("antenna height must be finite and non-negative, got {0}")]
    InvalidAntennaHeight(f64),

    #[error("grid row width must be at least 1")]
    ZeroRowWidth,

    #[error("grid spacing must be positive and finite, got {0}")]
    InvalidGridSpacing(f64),

    #[error("random walk leg distance must be positive and finite, got {0}")]
    InvalidLegDistance(f64),

    #[error("simulation duration must be positive and finite, got {0} s")]
    InvalidDuration(f64),

    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// 协作组件（无线引擎 / 地址分配）错误
#[derive(Debug, Error)]
pub enum CollaboratorError {
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("unknown device {0:?}")]
    UnknownDevice(DeviceId),

    #[error("node {node:?} is a {actual}, expected a {expected}")]
    WrongNodeKind {
        node: NodeId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("device {device:?} is a {actual} device, expected a {expected} device")]
    WrongDeviceKind {
        device: DeviceId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("node {0:?} already has a radio device installed")]
    DeviceAlreadyInstalled(NodeId),

    #[error("collaborator returned no {set} at index {index}")]
    MissingDevice { set: &'static str, index: usize },

    #[error("terminal device {0:?} is already attached")]
    AlreadyAttached(DeviceId),

    #[error("node {0:?} has no internet stack installed")]
    NoInternetStack(NodeId),

    #[error("device {0:?} already has an address")]
    AlreadyAddressed(DeviceId),

    #[error("address pool {network}/{prefix_len} exhausted")]
    AddressPoolExhausted {
        network: std::net::Ipv4Addr,
        prefix_len: u8,
    },
}

/// 场景构建错误
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}
