//! Tests for the exhaustive search.

use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use gatesmith_ir::{Circuit, Gate, GateCatalog, Unitary, UnitaryComposer, distance};
use gatesmith_search::{ExhaustiveSearch, LocalShardPool, SearchError};
use num_complex::Complex64;

fn swap() -> Unitary {
    let o = Complex64::new(0.0, 0.0);
    let l = Complex64::new(1.0, 0.0);
    Unitary::from_rows(&[
        vec![l, o, o, o],
        vec![o, o, l, o],
        vec![o, l, o, o],
        vec![o, o, o, l],
    ])
    .unwrap()
}

fn swap_catalog() -> GateCatalog {
    GateCatalog::from_gates([Gate::rxx(FRAC_PI_2), Gate::rx(FRAC_PI_2), Gate::rx(-FRAC_PI_2)])
}

// ---------------------------------------------------------------------------
// Negative results
// ---------------------------------------------------------------------------

#[test]
fn swap_exhausts_every_shard_at_depth_three() {
    let composer = UnitaryComposer::new();
    let target = swap();
    let search = ExhaustiveSearch::new(&composer, &target, &swap_catalog(), 2, 0.01).unwrap();

    let sharded = LocalShardPool::new(4).unwrap().run(&search, 3).unwrap();
    assert!(!sharded.is_found());
    assert_eq!(sharded.total_evaluated(), 125);
    assert!(sharded.reports().iter().all(|r| !r.outcome.is_found()));

    // Everything reachable is diagonal in the X basis, so fidelity <= 1/2
    let best = sharded.stats().best_distance.unwrap();
    assert!(best > 0.8, "best distance {best}");
}

#[test]
fn swap_up_to_three_scans_every_length() {
    let composer = UnitaryComposer::new();
    let target = swap();
    let search = ExhaustiveSearch::new(&composer, &target, &swap_catalog(), 2, 0.01).unwrap();
    let outcome = search.run_up_to(3).unwrap();
    assert!(!outcome.is_found());
    // The empty circuit counts as length 0
    assert_eq!(outcome.stats().evaluated, 1 + 5 + 25 + 125);
}

#[test]
fn depth_zero_fails_for_non_identity() {
    let composer = UnitaryComposer::new();
    let target = swap();
    let search = ExhaustiveSearch::new(&composer, &target, &swap_catalog(), 2, 0.01).unwrap();
    let outcome = search.run(0).unwrap();
    assert!(!outcome.is_found());
    assert_eq!(outcome.stats().evaluated, 1);
}

#[test]
fn depth_zero_matches_phased_identity() {
    let composer = UnitaryComposer::new();
    let target = Unitary::identity(2).scaled(Complex64::from_polar(1.0, 0.7));
    let search = ExhaustiveSearch::new(&composer, &target, &swap_catalog(), 2, 1e-6).unwrap();
    let outcome = search.run(0).unwrap();
    let solution = outcome.solution().unwrap();
    assert!(solution.is_empty());
    assert_eq!(solution.candidate_index, Some(0));
}

#[test]
fn identity_has_no_single_gate_false_positive() {
    let composer = UnitaryComposer::new();
    let target = Unitary::identity(2);
    let catalog = GateCatalog::hardware_native();
    let search = ExhaustiveSearch::new(&composer, &target, &catalog, 2, 1e-3).unwrap();
    assert_eq!(search.moves().len(), 13);

    let outcome = search.run(1).unwrap();
    assert!(!outcome.is_found());
    assert_eq!(outcome.stats().evaluated, 13);
}

// ---------------------------------------------------------------------------
// Positive results
// ---------------------------------------------------------------------------

#[test]
fn found_circuit_reproduces_target() {
    let composer = UnitaryComposer::new();
    let mut circuit = Circuit::new(3);
    circuit.append(Arc::new(Gate::rxx(FRAC_PI_2)), 1).unwrap();
    circuit.append(Arc::new(Gate::ry(-FRAC_PI_2)), 0).unwrap();
    let target = composer.compose(&circuit).unwrap();

    let catalog = GateCatalog::hardware_native();
    let search = ExhaustiveSearch::new(&composer, &target, &catalog, 3, 1e-6).unwrap();
    let outcome = search.run(2).unwrap();
    let solution = outcome.solution().unwrap();
    assert!(solution.distance < 1e-6);

    let rebuilt = composer.compose(&solution.to_circuit(3).unwrap()).unwrap();
    assert!(distance(&rebuilt, &target) < 1e-6);
}

#[test]
fn repeated_runs_hit_the_cache() {
    let composer = UnitaryComposer::new();
    let target = swap();
    let search = ExhaustiveSearch::new(&composer, &target, &swap_catalog(), 2, 0.01).unwrap();

    let first = search.run(2).unwrap();
    assert_eq!(first.stats().cache_misses, 5);

    let second = search.run(2).unwrap();
    assert_eq!(second.stats().cache_misses, 0);
    assert!(second.stats().cache_hits > 0);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn no_fitting_gate_is_an_error() {
    let composer = UnitaryComposer::new();
    let target = Unitary::identity(1);
    let catalog = GateCatalog::from_gates([Gate::rxx(FRAC_PI_2)]);
    assert!(matches!(
        ExhaustiveSearch::new(&composer, &target, &catalog, 1, 0.01),
        Err(SearchError::NoMoves(1))
    ));
}

#[test]
fn oversized_space_is_an_error() {
    let composer = UnitaryComposer::new();
    let target = swap();
    let search = ExhaustiveSearch::new(&composer, &target, &swap_catalog(), 2, 0.01).unwrap();
    assert!(matches!(
        search.run(64),
        Err(SearchError::SearchSpaceTooLarge { moves: 5, depth: 64 })
    ));
}
