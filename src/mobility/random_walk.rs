//! 有界二维随机游走
//!
//! 位置按分段匀速直线运动惰性计算；每次段结束或碰到边界时由 [`WalkStep`]
//! 事件推进状态，同一节点任意时刻最多只有一个待执行事件。

use std::f64::consts::TAU;
use std::marker::PhantomData;

use super::models::MobilityHost;
use super::profile::WalkProfile;
use crate::net::NodeId;
use crate::sim::{Event, SimTime, Simulator, World};
use crate::topo::Position;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{trace, warn};

/// 判定贴墙的容差（米）
const WALL_EPS: f64 = 1e-6;

#[derive(Debug, Clone)]
pub(crate) struct RandomWalk {
    profile: WalkProfile,
    rng: ChaCha8Rng,
    origin: Position,
    origin_at: SimTime,
    vx: f64,
    vy: f64,
    leg_end: SimTime,
}

impl RandomWalk {
    pub(crate) fn new(start: Position, profile: WalkProfile, stream_seed: u64) -> Self {
        Self {
            origin: profile.bounds.clamp(start),
            profile,
            rng: ChaCha8Rng::seed_from_u64(stream_seed),
            origin_at: SimTime::ZERO,
            vx: 0.0,
            vy: 0.0,
            leg_end: SimTime::ZERO,
        }
    }

    pub(crate) fn profile(&self) -> &WalkProfile {
        &self.profile
    }

    pub(crate) fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    pub(crate) fn position_at(&self, now: SimTime) -> Position {
        let dt = now.secs_since(self.origin_at);
        let p = Position::new(
            self.origin.x + self.vx * dt,
            self.origin.y + self.vy * dt,
            self.origin.z,
        );
        self.profile.bounds.clamp(p)
    }

    /// 推进到 `now`，返回下一次需要唤醒的时间；速度为 0 时不再唤醒。
    pub(crate) fn step(&mut self, now: SimTime) -> Option<SimTime> {
        self.origin = self.position_at(now);
        self.origin_at = now;

        if now >= self.leg_end {
            let speed = self.profile.speed.sample(&mut self.rng);
            let heading = self.rng.gen_range(0.0..TAU);
            if speed <= 0.0 {
                self.vx = 0.0;
                self.vy = 0.0;
                return None;
            }
            self.vx = speed * heading.cos();
            self.vy = speed * heading.sin();
            self.leg_end = now.saturating_add(SimTime::from_secs_f64(
                self.profile.leg_distance / speed,
            ));
            trace!(speed, heading, leg_end = ?self.leg_end, "新的游走段");
        } else {
            self.reflect();
        }

        let hit = self.secs_to_boundary();
        let next = if hit.is_finite() {
            now.saturating_add(SimTime::from_secs_f64(hit))
                .min(self.leg_end)
        } else {
            self.leg_end
        };
        Some(next)
    }

    fn reflect(&mut self) {
        let b = self.profile.bounds;
        let p = self.origin;
        if (p.x <= b.min_x + WALL_EPS && self.vx < 0.0)
            || (p.x >= b.max_x - WALL_EPS && self.vx > 0.0)
        {
            self.vx = -self.vx;
        }
        if (p.y <= b.min_y + WALL_EPS && self.vy < 0.0)
            || (p.y >= b.max_y - WALL_EPS && self.vy > 0.0)
        {
            self.vy = -self.vy;
        }
    }

    fn secs_to_boundary(&self) -> f64 {
        let b = self.profile.bounds;
        axis_hit(self.origin.x, self.vx, b.min_x, b.max_x)
            .min(axis_hit(self.origin.y, self.vy, b.min_y, b.max_y))
    }
}

fn axis_hit(p: f64, v: f64, lo: f64, hi: f64) -> f64 {
    let t = if v > 0.0 {
        (hi - p) / v
    } else if v < 0.0 {
        (lo - p) / v
    } else {
        f64::INFINITY
    };
    t.max(0.0)
}

/// 推进某个终端随机游走的事件
pub(crate) struct WalkStep<W> {
    node: NodeId,
    _world: PhantomData<fn() -> W>,
}

impl<W> WalkStep<W> {
    pub(crate) fn new(node: NodeId) -> Self {
        Self {
            node,
            _world: PhantomData,
        }
    }
}

impl<W: World + MobilityHost> Event for WalkStep<W> {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) {
        let Some(w) = world.as_any_mut().downcast_mut::<W>() else {
            warn!(node = ?self.node, "世界类型不匹配，停止游走");
            return;
        };
        if let Some(next) = w.mobility_mut().step(self.node, sim.now()) {
            sim.schedule(next, WalkStep::<W>::new(self.node));
        }
    }
}
