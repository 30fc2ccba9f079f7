use crate::attach::{AttachmentPolicy, AttachmentRecord};
use crate::net::{CellularNetwork, EpcAddressing, PathlossModel, PhyConfig};
use crate::scenario::{PreparedScenario, ScenarioConfig, ScenarioDriver, seeded_rng};
use crate::sim::{SimTime, Simulator};
use crate::topo::Position;
use crate::{CollaboratorError, ConfigError, ScenarioError};
use rand::{Rng, RngCore};
use std::net::Ipv4Addr;

type Prepared = PreparedScenario<CellularNetwork, EpcAddressing>;

fn setup(cfg: ScenarioConfig) -> Result<Prepared, ScenarioError> {
    ScenarioDriver::new(cfg).setup_seeded(
        CellularNetwork::new(PhyConfig::default()),
        EpcAddressing::default(),
    )
}

#[test]
fn default_scenario_builds_eleven_cells_and_fifty_attached_terminals() {
    let cfg = ScenarioConfig {
        seed: 2024,
        ..ScenarioConfig::default()
    };
    let bounds = cfg.area.bounds();
    let prepared = setup(cfg).expect("setup");
    let layout = prepared.layout();

    assert_eq!(layout.cell_count(), 11);
    assert_eq!(layout.anchor.position, Position::new(50_000.0, 50_000.0, 3.0));
    assert_eq!(layout.terminals.len(), 50);
    for t in &layout.terminals {
        assert!(bounds.contains(&t.position), "outside area: {t:?}");
    }

    assert_eq!(layout.attachments.len(), 50);
    for (i, r) in layout.attachments.iter().enumerate() {
        assert_eq!(r.terminal, i);
        assert!(r.small_cell < 10);
    }

    let radio = &prepared.world().radio;
    assert_eq!(radio.attachments().len(), 50);
    // Nodes: small cells 0..10, anchor 10, terminals 11..61.
    assert_eq!(layout.anchor.node.0, 10);
    assert_eq!(layout.terminals[0].node.0, 11);
    for (r, att) in layout.attachments.iter().zip(radio.attachments()) {
        let sc_node = radio.device(att.small_cell).expect("device").node;
        assert_eq!(sc_node, layout.small_cells[r.small_cell].node);
        let ue_node = radio.device(att.terminal).expect("device").node;
        assert_eq!(ue_node, layout.terminals[r.terminal].node);
    }

    assert_eq!(layout.addresses.len(), 50);
    assert_eq!(layout.addresses[0].address, Ipv4Addr::new(7, 0, 0, 2));
    assert_eq!(layout.addresses[49].address, Ipv4Addr::new(7, 0, 0, 51));
}

#[test]
fn fixed_seed_reproduces_positions_and_attachments() {
    let cfg = ScenarioConfig::default();
    let a = setup(cfg.clone()).expect("setup");
    let b = setup(cfg.clone()).expect("setup");
    assert_eq!(a.layout().attachments, b.layout().attachments);
    assert_eq!(a.layout().terminals, b.layout().terminals);

    let c = setup(ScenarioConfig { seed: 77, ..cfg }).expect("setup");
    assert_eq!(a.layout().small_cells, c.layout().small_cells);
    assert_eq!(a.layout().anchor, c.layout().anchor);
    assert_ne!(a.layout().terminals, c.layout().terminals);
}

#[test]
fn random_draws_follow_mobility_then_attachment_order() {
    let cfg = ScenarioConfig {
        terminals: 8,
        small_cells: 5,
        seed: 31,
        ..ScenarioConfig::default()
    };
    let prepared = setup(cfg.clone()).expect("setup");

    let mut rng = seeded_rng(cfg.seed);
    let mut expected_positions = Vec::new();
    for _ in 0..cfg.terminals {
        let x: f64 = rng.gen_range(0.0..=cfg.area.max_x);
        let y: f64 = rng.gen_range(0.0..=cfg.area.max_y);
        let _walk_seed: u64 = rng.r#gen();
        expected_positions.push(Position::new(x, y, cfg.mobility.height));
    }
    let expected_cells: Vec<usize> = (0..cfg.terminals)
        .map(|_| rng.gen_range(0..cfg.small_cells))
        .collect();

    let layout = prepared.layout();
    let positions: Vec<Position> = layout.terminals.iter().map(|t| t.position).collect();
    let cells: Vec<usize> = layout.attachments.iter().map(|r| r.small_cell).collect();
    assert_eq!(positions, expected_positions);
    assert_eq!(cells, expected_cells);
}

#[test]
fn configuration_errors_abort_before_anything_is_built() {
    let no_cells = ScenarioConfig {
        small_cells: 0,
        ..ScenarioConfig::default()
    };
    assert!(matches!(
        setup(no_cells),
        Err(ScenarioError::Config(ConfigError::NoSmallCells { terminals: 50 }))
    ));

    let mut inverted = ScenarioConfig::default();
    inverted.mobility.speed.min = 20.0;
    assert!(matches!(
        setup(inverted),
        Err(ScenarioError::Config(ConfigError::InvertedSpeedRange { .. }))
    ));

    let mut flat = ScenarioConfig::default();
    flat.area.max_y = 0.0;
    assert!(matches!(
        setup(flat),
        Err(ScenarioError::Config(ConfigError::InvalidArea { .. }))
    ));

    let instant = ScenarioConfig {
        sim_time_s: 0.0,
        ..ScenarioConfig::default()
    };
    assert!(matches!(
        setup(instant),
        Err(ScenarioError::Config(ConfigError::InvalidDuration(_)))
    ));
}

#[test]
fn unsampleable_or_non_finite_values_are_config_errors() {
    let mut huge = ScenarioConfig::default();
    huge.area.max_x = f64::MAX;
    assert!(matches!(
        huge.validate(),
        Err(ConfigError::InvalidArea { .. })
    ));
    assert!(matches!(
        setup(huge),
        Err(ScenarioError::Config(ConfigError::InvalidArea { .. }))
    ));

    let mut fast = ScenarioConfig::default();
    fast.mobility.speed.max = f64::MAX;
    assert!(matches!(
        setup(fast),
        Err(ScenarioError::Config(ConfigError::InvalidSpeed { .. }))
    ));

    let mut floating = ScenarioConfig::default();
    floating.mobility.height = f64::NAN;
    assert!(matches!(
        setup(floating),
        Err(ScenarioError::Config(ConfigError::InvalidTerminalHeight(_)))
    ));

    let mut mast = ScenarioConfig::default();
    mast.grid.antenna_height = f64::NAN;
    assert!(matches!(
        setup(mast),
        Err(ScenarioError::Config(ConfigError::InvalidAntennaHeight(_)))
    ));

    let mut adrift = ScenarioConfig::default();
    adrift.grid.origin_y = f64::INFINITY;
    assert!(matches!(
        setup(adrift),
        Err(ScenarioError::Config(ConfigError::InvalidGridOrigin { .. }))
    ));
}

#[test]
fn empty_scenario_without_small_cells_is_valid() {
    let cfg = ScenarioConfig {
        small_cells: 0,
        terminals: 0,
        ..ScenarioConfig::default()
    };
    let prepared = setup(cfg).expect("nothing to attach");
    assert_eq!(prepared.layout().cell_count(), 1);
    assert!(prepared.layout().attachments.is_empty());
}

#[test]
fn collaborator_failures_propagate_unchanged() {
    let cfg = ScenarioConfig {
        terminals: 3,
        ..ScenarioConfig::default()
    };
    let result = ScenarioDriver::new(cfg).setup_seeded(
        CellularNetwork::default(),
        EpcAddressing::new(Ipv4Addr::new(192, 168, 0, 0), 30),
    );
    assert!(matches!(
        result,
        Err(ScenarioError::Collaborator(
            CollaboratorError::AddressPoolExhausted { prefix_len: 30, .. }
        ))
    ));
}

struct LastCell;

impl AttachmentPolicy for LastCell {
    fn choose(&self, _terminal: usize, small_cells: usize, _rng: &mut dyn RngCore) -> usize {
        small_cells - 1
    }
}

#[test]
fn driver_uses_the_injected_policy() {
    let cfg = ScenarioConfig {
        terminals: 4,
        small_cells: 3,
        ..ScenarioConfig::default()
    };
    let prepared = ScenarioDriver::with_policy(cfg, LastCell)
        .setup_seeded(CellularNetwork::default(), EpcAddressing::default())
        .expect("setup");
    assert!(
        prepared
            .layout()
            .attachments
            .iter()
            .all(|r| *r == AttachmentRecord { terminal: r.terminal, small_cell: 2 })
    );
}

#[test]
fn run_stops_at_configured_time_with_terminals_in_bounds() {
    let cfg = ScenarioConfig {
        terminals: 6,
        small_cells: 2,
        sim_time_s: 2.0,
        seed: 5,
        ..ScenarioConfig::default()
    };
    let bounds = cfg.area.bounds();
    let prepared = setup(cfg).expect("setup");
    assert_eq!(prepared.duration(), SimTime::from_secs(2));

    let mut sim = Simulator::default();
    let (layout, outcome) = prepared.run(&mut sim);

    assert_eq!(outcome.finished_at, SimTime::from_secs(2));
    assert!(outcome.events > 0);
    assert_eq!(outcome.final_terminal_positions.len(), 6);
    for (start, end) in layout.terminals.iter().zip(&outcome.final_terminal_positions) {
        assert!(bounds.contains(end));
        // At most 10 m/s for 2 s.
        assert!(start.position.distance_2d(end) <= 20.0 + 1e-6);
    }
    assert_eq!(sim.pending(), 0);
}

#[test]
fn configured_phy_reaches_the_radio_engine() {
    let phy = PhyConfig {
        bandwidth_hz: 100e6,
        center_frequency_hz: 28e9,
        pathloss: PathlossModel::ThreeGppUma,
        ..PhyConfig::default()
    };
    let prepared = ScenarioDriver::new(ScenarioConfig::default())
        .setup_seeded(CellularNetwork::new(phy.clone()), EpcAddressing::default())
        .expect("setup");
    assert_eq!(prepared.world().radio.phy(), &phy);
    assert_eq!(prepared.world().radio.device_count(), 61);
}
