//! 世界 trait
//!
//! 定义仿真世界接口。

use super::simulator::Simulator;
use std::any::Any;

/// 仿真世界：由场景层实现（节点、设备、移动模型等）。
pub trait World: Any {
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// 每个事件执行后回调
    fn on_tick(&mut self, _sim: &mut Simulator) {}

    /// 仿真结束时整体拆除
    fn teardown(&mut self) {}
}
