//! 节点/设备集合
//!
//! 保持创建顺序的有序集合；集合内下标即场景中的“小基站下标”“终端下标”。

use super::id::{DeviceId, NodeId};

/// 节点集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSet {
    nodes: Vec<NodeId>,
}

impl NodeSet {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<NodeId> {
        self.nodes.get(idx).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }
}

impl FromIterator<NodeId> for NodeSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

/// 已安装设备的句柄：设备及其所在节点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceHandle {
    pub device: DeviceId,
    pub node: NodeId,
}

/// 设备集合，顺序与安装时传入的节点集合一致
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSet {
    devices: Vec<DeviceHandle>,
}

impl DeviceSet {
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<DeviceHandle> {
        self.devices.get(idx).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = DeviceHandle> + '_ {
        self.devices.iter().copied()
    }
}

impl FromIterator<DeviceHandle> for DeviceSet {
    fn from_iter<I: IntoIterator<Item = DeviceHandle>>(iter: I) -> Self {
        Self {
            devices: iter.into_iter().collect(),
        }
    }
}
