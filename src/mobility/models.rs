//! 移动模型登记
//!
//! 每个节点一个模型：静止或有界随机游走。

use std::collections::BTreeMap;

use super::profile::{MobilityProfile, WalkProfile};
use super::random_walk::{RandomWalk, WalkStep};
use crate::net::NodeId;
use crate::sim::{SimTime, Simulator, World};
use crate::topo::Position;
use tracing::debug;

/// 移动引擎接口
pub trait MobilityEngine {
    fn set_static_position(&mut self, node: NodeId, position: Position);

    /// 从 `start` 出发的随机游走；`stream_seed` 决定该节点之后的全部轨迹。
    fn set_random_walk(
        &mut self,
        node: NodeId,
        start: Position,
        profile: &WalkProfile,
        stream_seed: u64,
    );
}

/// 持有 [`MobilityModels`] 的世界，供游走事件访问
pub trait MobilityHost {
    fn mobility_mut(&mut self) -> &mut MobilityModels;
}

#[derive(Debug, Clone)]
enum Model {
    Static(Position),
    Walk(RandomWalk),
}

/// 按节点标识有序保存的移动模型
#[derive(Debug, Default)]
pub struct MobilityModels {
    models: BTreeMap<NodeId, Model>,
}

impl MobilityModels {
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// 节点在 `now` 时刻的位置
    pub fn position(&self, node: NodeId, now: SimTime) -> Option<Position> {
        self.models.get(&node).map(|m| match m {
            Model::Static(p) => *p,
            Model::Walk(w) => w.position_at(now),
        })
    }

    pub fn profile(&self, node: NodeId) -> Option<MobilityProfile> {
        self.models.get(&node).map(|m| match m {
            Model::Static(_) => MobilityProfile::Static,
            Model::Walk(w) => MobilityProfile::RandomWalk(*w.profile()),
        })
    }

    /// 为每个随机游走节点按标识顺序调度首个游走事件，返回调度数量。
    pub fn start_walks<W: World + MobilityHost>(&self, sim: &mut Simulator) -> usize {
        let mut started = 0;
        for (node, model) in &self.models {
            if matches!(model, Model::Walk(_)) {
                sim.schedule(sim.now(), WalkStep::<W>::new(*node));
                started += 1;
            }
        }
        debug!(started, "启动随机游走");
        started
    }

    pub(crate) fn step(&mut self, node: NodeId, now: SimTime) -> Option<SimTime> {
        match self.models.get_mut(&node)? {
            Model::Walk(w) => w.step(now),
            Model::Static(_) => None,
        }
    }

    pub fn clear(&mut self) {
        self.models.clear();
    }
}

impl MobilityEngine for MobilityModels {
    fn set_static_position(&mut self, node: NodeId, position: Position) {
        self.models.insert(node, Model::Static(position));
    }

    fn set_random_walk(
        &mut self,
        node: NodeId,
        start: Position,
        profile: &WalkProfile,
        stream_seed: u64,
    ) {
        self.models
            .insert(node, Model::Walk(RandomWalk::new(start, *profile, stream_seed)));
    }
}
