//! 移动配置器
//!
//! 基站获得静止模型；终端在区域内均匀随机落点并获得随机游走模型。

use super::models::MobilityEngine;
use super::profile::{TerminalMobility, WalkProfile};
use crate::net::NodeSet;
use crate::topo::{Area, Position};
use rand::Rng;
use tracing::debug;

/// 按顺序把 `positions` 设为 `cells` 的静止位置
pub fn configure_cells<M>(engine: &mut M, cells: &NodeSet, positions: &[Position])
where
    M: MobilityEngine + ?Sized,
{
    debug_assert_eq!(cells.len(), positions.len());
    for (node, pos) in cells.iter().zip(positions) {
        engine.set_static_position(node, *pos);
    }
}

/// 为每个终端抽取初始位置与游走随机流种子，返回初始位置（与 `terminals` 同序）。
///
/// 每个终端依次消耗三次抽样：x、y、游走种子。游走运行期间的抽样只来自各自的
/// 随机流，不影响 `rng` 的后续序列。
pub fn configure_terminals<M, R>(
    engine: &mut M,
    terminals: &NodeSet,
    area: Area,
    cfg: &TerminalMobility,
    rng: &mut R,
) -> Vec<Position>
where
    M: MobilityEngine + ?Sized,
    R: Rng + ?Sized,
{
    let profile = WalkProfile {
        speed: cfg.speed,
        bounds: area.bounds(),
        leg_distance: cfg.leg_distance,
    };

    let positions: Vec<Position> = terminals
        .iter()
        .map(|node| {
            let x = rng.gen_range(0.0..=area.max_x);
            let y = rng.gen_range(0.0..=area.max_y);
            let stream_seed: u64 = rng.r#gen();
            let start = Position::new(x, y, cfg.height);
            engine.set_random_walk(node, start, &profile, stream_seed);
            start
        })
        .collect();

    debug!(
        terminals = positions.len(),
        min_speed = cfg.speed.min,
        max_speed = cfg.speed.max,
        "终端移动配置完成"
    );
    positions
}
