use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "hetsim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn run_scenario(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_hetnet_scenario"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run hetnet_scenario")
}

fn read_layout(path: &PathBuf) -> Value {
    let raw = fs::read_to_string(path).expect("read layout json");
    serde_json::from_str(&raw).expect("parse layout json")
}

#[test]
fn default_scenario_writes_layout_with_eleven_cells_and_fifty_terminals() {
    let dir = unique_temp_dir("default-layout");
    let out = dir.join("layout.json");

    let output = run_scenario(&[
        "--sim-time-s",
        "0.5",
        "--seed",
        "7",
        "--layout-json",
        out.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "hetnet_scenario failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("cells=11, terminals=50, attachments=50"),
        "unexpected summary: {stdout}"
    );

    let v = read_layout(&out);
    let anchor = &v["anchor"]["position"];
    assert_eq!(anchor["x"].as_f64(), Some(50_000.0));
    assert_eq!(anchor["y"].as_f64(), Some(50_000.0));
    assert_eq!(anchor["z"].as_f64(), Some(3.0));
    assert_eq!(v["small_cells"].as_array().map(Vec::len), Some(10));

    let terminals = v["terminals"].as_array().expect("terminals array");
    assert_eq!(terminals.len(), 50);
    for t in terminals {
        let x = t["position"]["x"].as_f64().expect("x");
        let y = t["position"]["y"].as_f64().expect("y");
        assert!((0.0..=100_000.0).contains(&x) && (0.0..=100_000.0).contains(&y));
    }

    let attachments = v["attachments"].as_array().expect("attachments array");
    assert_eq!(attachments.len(), 50);
    for a in attachments {
        assert!(a["small_cell"].as_u64().expect("small_cell") < 10);
    }
    assert_eq!(v["addresses"][0]["address"].as_str(), Some("7.0.0.2"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn same_config_file_and_seed_reproduce_layout() {
    let dir = unique_temp_dir("repro");
    let config = write_file(
        &dir,
        "scenario.json",
        r#"
{
    "sim_time_s": 0.2,
    "small_cells": 4,
    "terminals": 12,
    "area": { "max_x": 2000.0, "max_y": 1000.0 },
    "seed": 1234
}
        "#,
    );
    let first = dir.join("a.json");
    let second = dir.join("b.json");

    for out in [&first, &second] {
        let output = run_scenario(&[
            "--config",
            config.to_str().unwrap(),
            "--layout-json",
            out.to_str().unwrap(),
        ]);
        assert!(
            output.status.success(),
            "hetnet_scenario failed: stderr={}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let a = read_layout(&first);
    let b = read_layout(&second);
    assert_eq!(a, b);
    assert_eq!(a["seed"].as_u64(), Some(1234));
    assert_eq!(a["anchor"]["position"]["x"].as_f64(), Some(1000.0));
    assert_eq!(a["terminals"].as_array().map(Vec::len), Some(12));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn zero_small_cells_with_terminals_fails_setup() {
    let dir = unique_temp_dir("no-cells");
    let out = dir.join("layout.json");

    let output = run_scenario(&[
        "--small-cells",
        "0",
        "--layout-json",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success(), "setup should have been rejected");
    assert!(!out.exists(), "no layout may be written for a rejected scenario");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn inverted_speed_range_fails_setup() {
    let output = run_scenario(&["--min-speed", "12", "--max-speed", "3"]);
    assert!(!output.status.success());
}
