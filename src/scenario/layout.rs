//! 场景布局快照
//!
//! 搭建完成后的节点位置、地址与绑定，可序列化为 JSON。

use crate::attach::AttachmentRecord;
use crate::net::{AddressBinding, NodeId};
use crate::topo::Position;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub node: NodeId,
    pub position: Position,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioLayout {
    pub seed: u64,
    pub anchor: Placement,
    pub small_cells: Vec<Placement>,
    /// 终端初始位置，按终端下标排列
    pub terminals: Vec<Placement>,
    pub addresses: Vec<AddressBinding>,
    pub attachments: Vec<AttachmentRecord>,
}

impl ScenarioLayout {
    /// 基站位置总数（锚点 + 小基站）
    pub fn cell_count(&self) -> usize {
        self.small_cells.len() + 1
    }
}
