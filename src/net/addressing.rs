//! IP 地址分配
//!
//! 场景核心只请求为终端设备分配地址并保存返回的绑定；[`EpcAddressing`]
//! 模拟 EPC 的 UE 地址池：网络 `7.0.0.0/8`，网关占用 `7.0.0.1`，终端从
//! `7.0.0.2` 起顺序分配。

use std::collections::{HashMap, HashSet};
use std::net::Ipv4Addr;

use super::container::{DeviceSet, NodeSet};
use super::id::{DeviceId, NodeId};
use crate::error::CollaboratorError;
use serde::Serialize;
use tracing::{debug, trace};

/// 地址分配服务接口
pub trait AddressingService {
    /// 在节点上安装 IP 协议栈
    fn install_stack(&mut self, nodes: &NodeSet) -> Result<(), CollaboratorError>;

    /// 按集合顺序为设备分配地址
    fn assign_addresses(
        &mut self,
        devices: &DeviceSet,
    ) -> Result<Vec<AddressBinding>, CollaboratorError>;

    fn teardown(&mut self);
}

/// 接口句柄（对场景核心不透明）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InterfaceId(pub u32);

/// 设备到 IP 地址的绑定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressBinding {
    pub device: DeviceId,
    pub node: NodeId,
    pub interface: InterfaceId,
    pub address: Ipv4Addr,
}

/// EPC 风格的 UE 地址池
#[derive(Debug)]
pub struct EpcAddressing {
    network: Ipv4Addr,
    prefix_len: u8,
    next_host: u32,
    stacks: HashSet<NodeId>,
    bindings: HashMap<DeviceId, AddressBinding>,
    next_interface: u32,
}

impl Default for EpcAddressing {
    fn default() -> Self {
        Self::new(Ipv4Addr::new(7, 0, 0, 0), 8)
    }
}

impl EpcAddressing {
    /// 第一个可分配给终端的主机号（1 号留给网关）
    const FIRST_HOST: u32 = 2;

    /// `prefix_len` 取值 1..=30。
    pub fn new(network: Ipv4Addr, prefix_len: u8) -> Self {
        let prefix_len = prefix_len.clamp(1, 30);
        let mask = u32::MAX << (32 - prefix_len);
        Self {
            network: Ipv4Addr::from(u32::from(network) & mask),
            prefix_len,
            next_host: Self::FIRST_HOST,
            stacks: HashSet::new(),
            bindings: HashMap::new(),
            next_interface: 1,
        }
    }

    /// 网关地址
    pub fn gateway(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.network) + 1)
    }

    pub fn has_stack(&self, node: NodeId) -> bool {
        self.stacks.contains(&node)
    }

    pub fn binding(&self, device: DeviceId) -> Option<&AddressBinding> {
        self.bindings.get(&device)
    }

    /// 剩余可分配地址数（不含广播地址）
    fn remaining(&self) -> u32 {
        let broadcast_host = (1u32 << (32 - self.prefix_len)) - 1;
        broadcast_host.saturating_sub(self.next_host)
    }
}

impl AddressingService for EpcAddressing {
    fn install_stack(&mut self, nodes: &NodeSet) -> Result<(), CollaboratorError> {
        self.stacks.extend(nodes.iter());
        debug!(count = nodes.len(), "安装 IP 协议栈");
        Ok(())
    }

    #[tracing::instrument(skip(self, devices), fields(count = devices.len()))]
    fn assign_addresses(
        &mut self,
        devices: &DeviceSet,
    ) -> Result<Vec<AddressBinding>, CollaboratorError> {
        // 先整体校验：要么全部分配，要么不改变任何状态
        let mut pending = HashSet::new();
        for handle in devices.iter() {
            if !self.stacks.contains(&handle.node) {
                return Err(CollaboratorError::NoInternetStack(handle.node));
            }
            if self.bindings.contains_key(&handle.device) || !pending.insert(handle.device) {
                return Err(CollaboratorError::AlreadyAddressed(handle.device));
            }
        }
        if devices.len() as u64 > self.remaining() as u64 {
            return Err(CollaboratorError::AddressPoolExhausted {
                network: self.network,
                prefix_len: self.prefix_len,
            });
        }

        let base = u32::from(self.network);
        let bindings: Vec<AddressBinding> = devices
            .iter()
            .map(|handle| {
                let binding = AddressBinding {
                    device: handle.device,
                    node: handle.node,
                    interface: InterfaceId(self.next_interface),
                    address: Ipv4Addr::from(base + self.next_host),
                };
                self.next_host += 1;
                self.next_interface += 1;
                self.bindings.insert(handle.device, binding);
                trace!(device = ?binding.device, address = %binding.address, "分配地址");
                binding
            })
            .collect();
        debug!(assigned = bindings.len(), gateway = %self.gateway(), "地址分配完成");
        Ok(bindings)
    }

    fn teardown(&mut self) {
        self.stacks.clear();
        self.bindings.clear();
        self.next_host = Self::FIRST_HOST;
        self.next_interface = 1;
    }
}
