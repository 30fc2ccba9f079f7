//! 拓扑模块
//!
//! 基站的确定性布局与几何类型。

pub mod grid;
mod position;

pub use grid::{CellTopology, GridLayout, build_topology};
pub use position::{Area, Position, Rectangle};
pub(crate) use position::sampleable;
