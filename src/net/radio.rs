//! 无线引擎
//!
//! 场景核心通过 [`RadioEngine`] 创建节点、安装设备并建立终端到基站的绑定；
//! [`CellularNetwork`] 是进程内的登记实现。

use std::collections::HashMap;

use super::container::{DeviceHandle, DeviceSet, NodeSet};
use super::device::{Device, DeviceKind, PhyConfig};
use super::id::{DeviceId, NodeId};
use super::node::{CellKind, Node, NodeKind};
use crate::error::CollaboratorError;
use tracing::{debug, trace};

/// 无线/网络引擎接口
pub trait RadioEngine {
    fn create_cells(&mut self, kind: CellKind, count: usize) -> NodeSet;

    fn create_terminals(&mut self, count: usize) -> NodeSet;

    fn install_small_cell_devices(&mut self, nodes: &NodeSet)
    -> Result<DeviceSet, CollaboratorError>;

    fn install_anchor_cell_device(&mut self, nodes: &NodeSet)
    -> Result<DeviceSet, CollaboratorError>;

    fn install_terminal_devices(&mut self, nodes: &NodeSet) -> Result<DeviceSet, CollaboratorError>;

    /// 将终端设备绑定到一个小基站设备与锚点设备。
    fn attach(
        &mut self,
        terminal: DeviceId,
        small_cell: DeviceId,
        anchor: DeviceId,
    ) -> Result<(), CollaboratorError>;

    /// 整体拆除所有节点、设备与绑定。
    fn teardown(&mut self);
}

/// 一条终端绑定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub terminal: DeviceId,
    pub small_cell: DeviceId,
    pub anchor: DeviceId,
}

/// 进程内无线引擎：登记节点、设备与绑定
#[derive(Debug, Default)]
pub struct CellularNetwork {
    phy: PhyConfig,
    nodes: Vec<Node>,
    devices: Vec<Device>,
    device_of: HashMap<NodeId, DeviceId>,
    attachments: Vec<Attachment>,
    attached: HashMap<DeviceId, usize>,
}

impl CellularNetwork {
    pub fn new(phy: PhyConfig) -> Self {
        Self {
            phy,
            ..Self::default()
        }
    }

    pub fn phy(&self) -> &PhyConfig {
        &self.phy
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(id.0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// 按绑定顺序返回所有终端绑定
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// 查询终端设备的绑定
    pub fn attachment_of(&self, terminal: DeviceId) -> Option<&Attachment> {
        self.attached.get(&terminal).map(|&i| &self.attachments[i])
    }

    fn add_nodes(&mut self, kind: NodeKind, count: usize) -> NodeSet {
        let prefix = match kind {
            NodeKind::AnchorCell => "anchor",
            NodeKind::SmallCell => "sc",
            NodeKind::Terminal => "ue",
        };
        let first = self.nodes.len();
        let set: NodeSet = (first..first + count).map(NodeId).collect();
        for (i, id) in set.iter().enumerate() {
            self.nodes.push(Node::new(id, kind, format!("{prefix}{i}")));
        }
        debug!(kind = kind.as_str(), count, first_id = first, "创建节点");
        set
    }

    fn install(
        &mut self,
        nodes: &NodeSet,
        kind: DeviceKind,
    ) -> Result<DeviceSet, CollaboratorError> {
        // 先整体校验，失败时不留下半装的设备
        for node in nodes.iter() {
            let actual = self
                .node(node)
                .ok_or(CollaboratorError::UnknownNode(node))?
                .kind();
            if actual != kind.node_kind() {
                return Err(CollaboratorError::WrongNodeKind {
                    node,
                    expected: kind.node_kind().as_str(),
                    actual: actual.as_str(),
                });
            }
            if self.device_of.contains_key(&node) {
                return Err(CollaboratorError::DeviceAlreadyInstalled(node));
            }
        }
        if let Some(dup) = first_duplicate(nodes.as_slice()) {
            return Err(CollaboratorError::DeviceAlreadyInstalled(dup));
        }

        let set = nodes
            .iter()
            .map(|node| {
                let device = DeviceId(self.devices.len());
                self.devices.push(Device { id: device, node, kind });
                self.device_of.insert(node, device);
                trace!(?node, ?device, kind = kind.as_str(), "安装设备");
                DeviceHandle { device, node }
            })
            .collect();
        debug!(
            kind = kind.as_str(),
            count = nodes.len(),
            bandwidth_hz = self.phy.bandwidth_hz,
            center_frequency_hz = self.phy.center_frequency_hz,
            pathloss = ?self.phy.pathloss,
            channel_condition = ?self.phy.channel_condition,
            "设备安装完成"
        );
        Ok(set)
    }

    fn expect_device(&self, id: DeviceId, kind: DeviceKind) -> Result<(), CollaboratorError> {
        let device = self.device(id).ok_or(CollaboratorError::UnknownDevice(id))?;
        if device.kind != kind {
            return Err(CollaboratorError::WrongDeviceKind {
                device: id,
                expected: kind.as_str(),
                actual: device.kind.as_str(),
            });
        }
        Ok(())
    }
}

fn first_duplicate(nodes: &[NodeId]) -> Option<NodeId> {
    let mut seen = std::collections::HashSet::new();
    nodes.iter().copied().find(|n| !seen.insert(*n))
}

impl RadioEngine for CellularNetwork {
    fn create_cells(&mut self, kind: CellKind, count: usize) -> NodeSet {
        self.add_nodes(kind.into(), count)
    }

    fn create_terminals(&mut self, count: usize) -> NodeSet {
        self.add_nodes(NodeKind::Terminal, count)
    }

    fn install_small_cell_devices(
        &mut self,
        nodes: &NodeSet,
    ) -> Result<DeviceSet, CollaboratorError> {
        self.install(nodes, DeviceKind::SmallCell)
    }

    fn install_anchor_cell_device(
        &mut self,
        nodes: &NodeSet,
    ) -> Result<DeviceSet, CollaboratorError> {
        self.install(nodes, DeviceKind::Anchor)
    }

    fn install_terminal_devices(
        &mut self,
        nodes: &NodeSet,
    ) -> Result<DeviceSet, CollaboratorError> {
        self.install(nodes, DeviceKind::Terminal)
    }

    fn attach(
        &mut self,
        terminal: DeviceId,
        small_cell: DeviceId,
        anchor: DeviceId,
    ) -> Result<(), CollaboratorError> {
        self.expect_device(terminal, DeviceKind::Terminal)?;
        self.expect_device(small_cell, DeviceKind::SmallCell)?;
        self.expect_device(anchor, DeviceKind::Anchor)?;
        if self.attached.contains_key(&terminal) {
            return Err(CollaboratorError::AlreadyAttached(terminal));
        }

        self.attached.insert(terminal, self.attachments.len());
        self.attachments.push(Attachment {
            terminal,
            small_cell,
            anchor,
        });
        trace!(?terminal, ?small_cell, ?anchor, "终端绑定");
        Ok(())
    }

    fn teardown(&mut self) {
        debug!(
            nodes = self.nodes.len(),
            devices = self.devices.len(),
            attachments = self.attachments.len(),
            "拆除无线引擎"
        );
        self.nodes.clear();
        self.devices.clear();
        self.device_of.clear();
        self.attachments.clear();
        self.attached.clear();
    }
}
