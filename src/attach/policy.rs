//! 终端绑定策略
//!
//! 每个终端按下标递增顺序，从 `[0, N)` 中均匀随机选取一个小基站，
//! 并同时绑定唯一的锚点基站。不考虑距离与信号质量，不限制小基站容量。

use crate::error::ConfigError;
use rand::{Rng, RngCore};
use serde::Serialize;
use tracing::debug;

/// 一个终端的绑定决定：终端下标 → 小基站下标（锚点隐含）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttachmentRecord {
    pub terminal: usize,
    pub small_cell: usize,
}

/// 小基站选择策略
pub trait AttachmentPolicy {
    /// 为第 `terminal` 个终端选择小基站下标；调用方保证 `small_cells > 0`。
    fn choose(&self, terminal: usize, small_cells: usize, rng: &mut dyn RngCore) -> usize;
}

/// 均匀随机选择
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandomAttachment;

impl AttachmentPolicy for UniformRandomAttachment {
    fn choose(&self, _terminal: usize, small_cells: usize, rng: &mut dyn RngCore) -> usize {
        rng.gen_range(0..small_cells)
    }
}

/// 为 `terminals` 个终端逐一决定绑定
///
/// 有终端而没有小基站时返回 [`ConfigError::NoSmallCells`]。
pub fn plan_attachments<P>(
    policy: &P,
    terminals: usize,
    small_cells: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<AttachmentRecord>, ConfigError>
where
    P: AttachmentPolicy + ?Sized,
{
    if small_cells == 0 && terminals > 0 {
        return Err(ConfigError::NoSmallCells { terminals });
    }

    let records: Vec<AttachmentRecord> = (0..terminals)
        .map(|terminal| AttachmentRecord {
            terminal,
            small_cell: policy.choose(terminal, small_cells, rng),
        })
        .collect();

    debug!(terminals, small_cells, "绑定决定完成");
    Ok(records)
}

/// 每个小基站分到的终端数
pub fn load_per_cell(records: &[AttachmentRecord], small_cells: usize) -> Vec<usize> {
    let mut load = vec![0; small_cells];
    for r in records {
        if let Some(slot) = load.get_mut(r.small_cell) {
            *slot += 1;
        }
    }
    load
}
