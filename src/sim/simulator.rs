//! 仿真器
//!
//! 定义事件驱动仿真器，维护当前时间与事件队列。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use super::world::World;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

/// 仿真引擎接口：场景驱动只通过“运行 D 时长后停止”的契约观察引擎。
pub trait SimulationEngine {
    /// 从当前时间起运行 `duration`，结束时当前时间恰为起点加 `duration`。
    fn run_for(&mut self, duration: SimTime, world: &mut dyn World);

    /// 丢弃所有未执行事件并整体拆除世界。
    fn stop_and_teardown(&mut self, world: &mut dyn World);
}

/// 事件驱动仿真器：维护当前时间与事件队列。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    executed: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 待执行事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 已执行事件总数
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// 调度事件在指定时间执行（早于当前时间的请求按当前时间处理）
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) {
        let at = at.max(self.now);
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        trace!(now = ?self.now, ?at, seq, event_type = std::any::type_name::<E>(), "调度事件");
        self.q.push(ScheduledEvent {
            at,
            seq,
            ev: Box::new(ev),
        });
    }

    /// 运行直到事件队列为空或到达 `until`。
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) {
        while let Some(top) = self.q.peek() {
            if top.at > until {
                break;
            }
            let Some(item) = self.q.pop() else { break };
            self.now = item.at;
            self.executed += 1;
            item.ev.execute(self, world);
            world.on_tick(self);
        }
        self.now = self.now.max(until);
    }
}

impl SimulationEngine for Simulator {
    #[tracing::instrument(skip_all, fields(start = %self.now, duration = %duration))]
    fn run_for(&mut self, duration: SimTime, world: &mut dyn World) {
        info!("▶️  开始运行仿真");
        let before = self.executed;
        let until = self.now.saturating_add(duration);
        self.run_until(until, world);
        info!(
            events = self.executed - before,
            final_time = %self.now,
            "✅ 仿真到达停止时间"
        );
    }

    fn stop_and_teardown(&mut self, world: &mut dyn World) {
        debug!(dropped_events = self.q.len(), now = %self.now, "停止仿真并拆除场景");
        self.q.clear();
        world.teardown();
    }
}
