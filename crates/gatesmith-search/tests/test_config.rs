//! Tests for configuration-driven runs.

use gatesmith_ir::{Unitary, UnitaryComposer};
use gatesmith_search::config::{ENV_RANK, ENV_WORLD_SIZE};
use gatesmith_search::{SearchConfig, Strategy};

const SWAP_YAML: &str = r"
num_qubits: 2
max_depth: 2
epsilon: 0.01
strategy: exhaustive
gates:
  - { kind: rxx, theta: 1.5707963267948966 }
  - { kind: rx, theta: 1.5707963267948966 }
  - { kind: rx, theta: -1.5707963267948966 }
target:
  - [[1, 0], [0, 0], [0, 0], [0, 0]]
  - [[0, 0], [0, 0], [1, 0], [0, 0]]
  - [[0, 0], [1, 0], [0, 0], [0, 0]]
  - [[0, 0], [0, 0], [0, 0], [1, 0]]
";

#[test]
fn yaml_swap_run_exhausts() {
    let config = SearchConfig::from_yaml_str(SWAP_YAML).unwrap();
    let target = config.target_unitary().unwrap().unwrap();
    assert!(target.is_unitary(1e-12));

    let composer = UnitaryComposer::new();
    let outcome = config.run(&composer, &target).unwrap();
    assert!(!outcome.is_found());
    assert_eq!(outcome.stats().evaluated, 25);
}

#[test]
fn overridden_shard_only_scans_its_residue_class() {
    let config = SearchConfig::from_yaml_str(SWAP_YAML)
        .unwrap()
        .apply_overrides(|key| match key {
            k if k == ENV_RANK => Some("1".to_string()),
            k if k == ENV_WORLD_SIZE => Some("3".to_string()),
            _ => None,
        });
    config.validate().unwrap();
    let target = config.target_unitary().unwrap().unwrap();

    let outcome = config.run(&UnitaryComposer::new(), &target).unwrap();
    // Indices 1, 4, ..., 22 of 25
    assert_eq!(outcome.stats().evaluated, 8);
}

#[test]
fn up_to_zero_depth_accepts_identity_target() {
    let config = SearchConfig {
        max_depth: 0,
        strategy: Strategy::ExhaustiveUpTo,
        ..SearchConfig::default()
    };
    config.validate().unwrap();

    let identity = Unitary::identity(2);
    let outcome = config.run(&UnitaryComposer::new(), &identity).unwrap();
    assert!(outcome.solution().unwrap().is_empty());
    assert_eq!(outcome.stats().evaluated, 1);
}

#[test]
fn greedy_strategy_round_trips_through_yaml() {
    let config = SearchConfig {
        strategy: Strategy::Greedy,
        ..SearchConfig::default()
    };
    let yaml = serde_yaml_ng::to_string(&config).unwrap();
    let parsed = SearchConfig::from_yaml_str(&yaml).unwrap();
    assert_eq!(parsed, config);
}
