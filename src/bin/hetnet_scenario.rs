//! 异构蜂窝网络场景
//!
//! 一个锚点宏基站 + 网格小基站 + 随机游走终端，搭建后运行固定时长。

use clap::Parser;
use hetsim_rs::net::{CellularNetwork, EpcAddressing};
use hetsim_rs::scenario::{ScenarioConfig, ScenarioDriver};
use hetsim_rs::sim::Simulator;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "hetnet-scenario",
    about = "异构蜂窝网络场景：锚点宏基站 + 网格小基站 + 随机游走终端"
)]
struct Args {
    /// 场景配置 JSON（缺省字段取内置默认值）
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    small_cells: Option<usize>,

    #[arg(long)]
    terminals: Option<usize>,

    /// 仿真时长（秒）
    #[arg(long)]
    sim_time_s: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// 区域 x 方向长度（米）
    #[arg(long)]
    max_x: Option<f64>,

    /// 区域 y 方向长度（米）
    #[arg(long)]
    max_y: Option<f64>,

    /// 终端最小速度（米/秒）
    #[arg(long)]
    min_speed: Option<f64>,

    /// 终端最大速度（米/秒）
    #[arg(long)]
    max_speed: Option<f64>,

    /// 输出搭建后的布局 JSON
    #[arg(long)]
    layout_json: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(ScenarioConfig, Option<PathBuf>), hetsim_rs::ConfigError> {
        let mut cfg = match &self.config {
            Some(path) => ScenarioConfig::from_json_file(path)?,
            None => ScenarioConfig::default(),
        };
        if let Some(v) = self.small_cells {
            cfg.small_cells = v;
        }
        if let Some(v) = self.terminals {
            cfg.terminals = v;
        }
        if let Some(v) = self.sim_time_s {
            cfg.sim_time_s = v;
        }
        if let Some(v) = self.seed {
            cfg.seed = v;
        }
        if let Some(v) = self.max_x {
            cfg.area.max_x = v;
        }
        if let Some(v) = self.max_y {
            cfg.area.max_y = v;
        }
        if let Some(v) = self.min_speed {
            cfg.mobility.speed.min = v;
        }
        if let Some(v) = self.max_speed {
            cfg.mobility.speed.max = v;
        }
        Ok((cfg, self.layout_json))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let (cfg, layout_json) = match Args::parse().into_config() {
        Ok(v) => v,
        Err(err) => {
            error!(%err, "读取配置失败");
            return ExitCode::FAILURE;
        }
    };

    let radio = CellularNetwork::new(cfg.phy.clone());
    let driver = ScenarioDriver::new(cfg);
    let prepared = match driver.setup_seeded(radio, EpcAddressing::default()) {
        Ok(p) => p,
        Err(err) => {
            error!(%err, "场景搭建失败");
            return ExitCode::FAILURE;
        }
    };

    let mut sim = Simulator::default();
    let (layout, outcome) = prepared.run(&mut sim);

    if let Some(path) = layout_json {
        let written = serde_json::to_string_pretty(&layout)
            .map_err(|e| e.to_string())
            .and_then(|raw| fs::write(&path, raw).map_err(|e| e.to_string()));
        if let Err(err) = written {
            error!(%err, path = %path.display(), "写出布局失败");
            return ExitCode::FAILURE;
        }
    }

    println!(
        "done @ {}, cells={}, terminals={}, attachments={}, events={}",
        outcome.finished_at,
        layout.cell_count(),
        layout.terminals.len(),
        layout.attachments.len(),
        outcome.events
    );
    ExitCode::SUCCESS
}
