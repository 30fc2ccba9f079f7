//! 节点类型
//!
//! 场景中的三类参与者：锚点宏基站、小基站与移动终端。

use super::id::NodeId;
use serde::{Deserialize, Serialize};

/// 节点类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    AnchorCell,
    SmallCell,
    Terminal,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::AnchorCell => "anchor cell",
            NodeKind::SmallCell => "small cell",
            NodeKind::Terminal => "terminal",
        }
    }
}

/// 基站类别（`create_cells` 的参数）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Anchor,
    Small,
}

impl From<CellKind> for NodeKind {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Anchor => NodeKind::AnchorCell,
            CellKind::Small => NodeKind::SmallCell,
        }
    }
}

/// 节点
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    name: String,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
