//! 蜂窝网络世界
//!
//! 仿真世界（World）实现：持有无线引擎、地址分配服务与移动模型。

use super::addressing::{AddressingService, EpcAddressing};
use super::radio::{CellularNetwork, RadioEngine};
use crate::mobility::{MobilityHost, MobilityModels};
use crate::sim::World;
use std::any::Any;
use tracing::info;

/// 一个场景的全部可变状态；仿真结束时整体拆除。
pub struct CellularWorld<R: RadioEngine = CellularNetwork, A: AddressingService = EpcAddressing> {
    pub radio: R,
    pub addressing: A,
    pub mobility: MobilityModels,
}

impl<R: RadioEngine, A: AddressingService> CellularWorld<R, A> {
    pub fn new(radio: R, addressing: A) -> Self {
        Self {
            radio,
            addressing,
            mobility: MobilityModels::default(),
        }
    }
}

impl Default for CellularWorld {
    fn default() -> Self {
        Self::new(CellularNetwork::default(), EpcAddressing::default())
    }
}

impl<R, A> World for CellularWorld<R, A>
where
    R: RadioEngine + 'static,
    A: AddressingService + 'static,
{
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn teardown(&mut self) {
        info!(mobility_models = self.mobility.len(), "🧹 拆除场景");
        self.mobility.clear();
        self.addressing.teardown();
        self.radio.teardown();
    }
}

impl<R, A> MobilityHost for CellularWorld<R, A>
where
    R: RadioEngine + 'static,
    A: AddressingService + 'static,
{
    fn mobility_mut(&mut self) -> &mut MobilityModels {
        &mut self.mobility
    }
}
