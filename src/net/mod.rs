//! 网络模块
//!
//! 节点、设备、无线引擎、地址分配以及承载它们的仿真世界。

mod addressing;
mod container;
mod device;
mod id;
mod net_world;
mod node;
mod radio;

pub use addressing::{AddressBinding, AddressingService, EpcAddressing, InterfaceId};
pub use container::{DeviceHandle, DeviceSet, NodeSet};
pub use device::{ChannelConditionModel, Device, DeviceKind, PathlossModel, PhyConfig};
pub use id::{DeviceId, NodeId};
pub use net_world::CellularWorld;
pub use node::{CellKind, Node, NodeKind};
pub use radio::{Attachment, CellularNetwork, RadioEngine};
