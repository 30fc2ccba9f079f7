//! 场景驱动
//!
//! 严格顺序、单次执行的搭建流程：
//! 校验配置 → 创建节点 → 网格拓扑 → 基站静止 / 终端随机游走 → 安装设备 →
//! 终端安装 IP 协议栈并分配地址 → 逐终端绑定 → 交给仿真器运行 → 拆除。
//! 任一步失败都直接返回错误，不会把部分搭建的世界交给仿真器。

use super::config::ScenarioConfig;
use super::layout::{Placement, ScenarioLayout};
use crate::attach::{AttachmentPolicy, UniformRandomAttachment, load_per_cell, plan_attachments};
use crate::error::{CollaboratorError, ScenarioError};
use crate::mobility::{MobilityEngine, configure_cells, configure_terminals};
use crate::net::{
    AddressingService, CellKind, CellularWorld, DeviceId, DeviceSet, NodeId, RadioEngine,
};
use crate::sim::{SimTime, SimulationEngine, Simulator};
use crate::topo::{Position, build_topology};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// 由种子构造场景使用的随机源
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// 场景驱动
#[derive(Debug, Clone)]
pub struct ScenarioDriver<P = UniformRandomAttachment> {
    cfg: ScenarioConfig,
    policy: P,
}

impl ScenarioDriver {
    pub fn new(cfg: ScenarioConfig) -> Self {
        Self::with_policy(cfg, UniformRandomAttachment)
    }
}

impl<P: AttachmentPolicy> ScenarioDriver<P> {
    pub fn with_policy(cfg: ScenarioConfig, policy: P) -> Self {
        Self { cfg, policy }
    }

    /// 用配置中的种子搭建场景
    pub fn setup_seeded<R, A>(
        &self,
        radio: R,
        addressing: A,
    ) -> Result<PreparedScenario<R, A>, ScenarioError>
    where
        R: RadioEngine,
        A: AddressingService,
    {
        let mut rng = seeded_rng(self.cfg.seed);
        self.setup(radio, addressing, &mut rng)
    }

    /// 搭建场景；随机抽样顺序固定：终端移动（逐终端），然后绑定（逐终端）。
    #[tracing::instrument(
        skip_all,
        fields(small_cells = self.cfg.small_cells, terminals = self.cfg.terminals)
    )]
    pub fn setup<R, A>(
        &self,
        radio: R,
        addressing: A,
        rng: &mut dyn RngCore,
    ) -> Result<PreparedScenario<R, A>, ScenarioError>
    where
        R: RadioEngine,
        A: AddressingService,
    {
        let cfg = &self.cfg;
        cfg.validate()?;

        let mut world = CellularWorld::new(radio, addressing);

        let small_nodes = world.radio.create_cells(CellKind::Small, cfg.small_cells);
        let anchor_nodes = world.radio.create_cells(CellKind::Anchor, 1);
        let terminal_nodes = world.radio.create_terminals(cfg.terminals);
        let anchor_node = anchor_nodes
            .get(0)
            .ok_or(CollaboratorError::MissingDevice {
                set: "anchor node",
                index: 0,
            })?;

        let topology = build_topology(cfg.small_cells, cfg.area, &cfg.grid)?;
        info!(
            anchor = ?topology.anchor,
            small_cells = topology.small_cells.len(),
            "📡 基站拓扑已生成"
        );

        configure_cells(&mut world.mobility, &small_nodes, &topology.small_cells);
        world
            .mobility
            .set_static_position(anchor_node, topology.anchor);
        let terminal_positions = configure_terminals(
            &mut world.mobility,
            &terminal_nodes,
            cfg.area,
            &cfg.mobility,
            &mut *rng,
        );
        info!(terminals = terminal_positions.len(), "🚶 移动模型已配置");

        let small_devs = world.radio.install_small_cell_devices(&small_nodes)?;
        let anchor_devs = world.radio.install_anchor_cell_device(&anchor_nodes)?;
        let terminal_devs = world.radio.install_terminal_devices(&terminal_nodes)?;
        debug!(
            small_cells = small_devs.len(),
            anchors = anchor_devs.len(),
            terminals = terminal_devs.len(),
            "无线设备已安装"
        );

        world.addressing.install_stack(&terminal_nodes)?;
        let addresses = world.addressing.assign_addresses(&terminal_devs)?;
        info!(assigned = addresses.len(), "🌐 终端地址已分配");

        let attachments =
            plan_attachments(&self.policy, cfg.terminals, cfg.small_cells, &mut *rng)?;
        let anchor_dev = device_at(&anchor_devs, "anchor device", 0)?;
        for record in &attachments {
            let terminal = device_at(&terminal_devs, "terminal device", record.terminal)?;
            let small_cell = device_at(&small_devs, "small cell device", record.small_cell)?;
            world.radio.attach(terminal, small_cell, anchor_dev)?;
        }
        info!(
            attachments = attachments.len(),
            load = ?load_per_cell(&attachments, cfg.small_cells),
            "🔗 终端绑定完成"
        );

        let layout = ScenarioLayout {
            seed: cfg.seed,
            anchor: Placement {
                node: anchor_node,
                position: topology.anchor,
            },
            small_cells: placements(small_nodes.as_slice(), &topology.small_cells),
            terminals: placements(terminal_nodes.as_slice(), &terminal_positions),
            addresses,
            attachments,
        };

        Ok(PreparedScenario {
            world,
            layout,
            duration: cfg.duration(),
        })
    }
}

fn device_at(
    set: &DeviceSet,
    name: &'static str,
    index: usize,
) -> Result<DeviceId, CollaboratorError> {
    set.get(index)
        .map(|h| h.device)
        .ok_or(CollaboratorError::MissingDevice { set: name, index })
}

fn placements(nodes: &[NodeId], positions: &[Position]) -> Vec<Placement> {
    nodes
        .iter()
        .zip(positions)
        .map(|(&node, &position)| Placement { node, position })
        .collect()
}

/// 搭建完成、尚未运行的场景
pub struct PreparedScenario<R: RadioEngine, A: AddressingService> {
    world: CellularWorld<R, A>,
    layout: ScenarioLayout,
    duration: SimTime,
}

/// 运行结果
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub finished_at: SimTime,
    pub events: u64,
    /// 停止时刻各终端的位置，按终端下标排列
    pub final_terminal_positions: Vec<Position>,
}

impl<R, A> PreparedScenario<R, A>
where
    R: RadioEngine + 'static,
    A: AddressingService + 'static,
{
    pub fn world(&self) -> &CellularWorld<R, A> {
        &self.world
    }

    pub fn layout(&self) -> &ScenarioLayout {
        &self.layout
    }

    pub fn duration(&self) -> SimTime {
        self.duration
    }

    /// 交给仿真器运行配置的时长，然后停止并整体拆除，返回布局快照与运行结果。
    pub fn run(mut self, sim: &mut Simulator) -> (ScenarioLayout, ScenarioOutcome) {
        let walks = self
            .world
            .mobility
            .start_walks::<CellularWorld<R, A>>(sim);
        info!(walks, duration = %self.duration, "⏱️  交给仿真器运行");

        let before = sim.executed();
        sim.run_for(self.duration, &mut self.world);

        let now = sim.now();
        let final_terminal_positions = self
            .layout
            .terminals
            .iter()
            .filter_map(|p| self.world.mobility.position(p.node, now))
            .collect();
        let outcome = ScenarioOutcome {
            finished_at: now,
            events: sim.executed() - before,
            final_terminal_positions,
        };

        sim.stop_and_teardown(&mut self.world);
        (self.layout, outcome)
    }
}
