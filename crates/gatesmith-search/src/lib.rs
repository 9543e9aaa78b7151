//! `gatesmith-search`: finding gate sequences that approximate a unitary.
//!
//! Given a target operator, a [`GateCatalog`](gatesmith_ir::GateCatalog) and a
//! sequence length, searches the sequences of valid placements
//! (catalog × qubit positions) for one whose composed unitary lies within
//! `epsilon` of the target:
//!
//! - **Exhaustive** ([`ExhaustiveSearch`]): enumerates every sequence in
//!   lexicographic order, split across workers by residue class of the
//!   candidate index ([`Shard`]). Complete for the given length.
//! - **Greedy** ([`GreedySearch`]): commits to locally best extensions and
//!   backtracks only over the first choice. Fast, but incomplete.
//!
//! Not finding a circuit is reported as [`SearchOutcome::Exhausted`], not as
//! an error.
//!
//! # Quick start
//!
//! ```rust
//! use std::f64::consts::FRAC_PI_2;
//! use std::sync::Arc;
//! use gatesmith_ir::{Circuit, Gate, GateCatalog, UnitaryComposer};
//! use gatesmith_search::ExhaustiveSearch;
//!
//! let composer = UnitaryComposer::new();
//! let mut circuit = Circuit::new(2);
//! circuit.append(Arc::new(Gate::rxx(FRAC_PI_2)), 0).unwrap();
//! circuit.append(Arc::new(Gate::ry(FRAC_PI_2)), 1).unwrap();
//! let target = composer.compose(&circuit).unwrap();
//!
//! let catalog = GateCatalog::hardware_native();
//! let search = ExhaustiveSearch::new(&composer, &target, &catalog, 2, 1e-6).unwrap();
//! let outcome = search.run_up_to(2).unwrap();
//! assert_eq!(outcome.solution().unwrap().len(), 2);
//! ```

pub mod brute_force;
pub mod config;
pub mod error;
pub mod greedy;
pub mod local;
pub mod moves;
pub mod outcome;
pub mod shard;

pub use brute_force::ExhaustiveSearch;
pub use config::{GateSpec, SearchConfig, ShardConfig, Strategy};
pub use error::{SearchError, SearchResult};
pub use greedy::{GreedyPhase, GreedySearch, SearchState};
pub use local::{LocalShardPool, ShardReport, ShardedOutcome};
pub use moves::{CompositionStack, MoveSet};
pub use outcome::{SearchOutcome, SearchStats, Solution};
pub use shard::Shard;
