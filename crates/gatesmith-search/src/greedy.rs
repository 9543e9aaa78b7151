//! Greedy depth-first search with blacklist backtracking.
//!
//! For each outer depth `d` in `0..max_depth` the search repeatedly:
//!
//! 1. picks the *first choice*: the block of `d + 1` moves, applied to the
//!    empty circuit, that lands closest to the target among blocks not yet
//!    blacklisted (ties go to the earliest block in enumeration order);
//! 2. greedily appends the single best move until the circuit holds
//!    `max_depth` placements, stopping as soon as the distance drops below
//!    `epsilon`;
//! 3. on failure blacklists the first choice, truncates the circuit to empty
//!    and tries again.
//!
//! Depth `d` is done once every block of length `d + 1` is blacklisted.
//!
//! # Incompleteness
//!
//! Only the first choice is ever revisited. The greedy extensions after it
//! are never backtracked, so a circuit reachable only through a locally
//! suboptimal step is missed by that attempt and found, if at all, only once
//! every better-scoring first choice has been blacklisted. Solutions are
//! therefore not guaranteed to be the shortest, and the attempt count can
//! grow to `m^(d+1)` per depth. The last depth tries every block of
//! `max_depth` moves as a first choice, so exhaustion does rule out
//! sequences of up to `max_depth` gates, at a cost well above
//! [`ExhaustiveSearch`](crate::ExhaustiveSearch).

use std::time::Instant;

use gatesmith_ir::{Circuit, GateCatalog, Unitary, UnitaryComposer, distance};
use rustc_hash::FxHashSet;
use tracing::{debug, info, trace};

use crate::error::SearchResult;
use crate::moves::{CompositionStack, MoveSet, check_problem};
use crate::outcome::{SearchOutcome, SearchStats, Solution};

/// Where a greedy search currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreedyPhase {
    /// Still trying first choices.
    Building,
    /// The circuit is within tolerance of the target.
    Converged,
    /// Every first choice at every depth failed.
    Exhausted,
}

/// Mutable state of one greedy run.
///
/// Returned by [`GreedySearch::run_with_state`] as it stood when the run
/// stopped: the converged circuit, or an empty one with the blacklist of the
/// last depth tried.
#[derive(Debug)]
pub struct SearchState<'c> {
    stack: CompositionStack<'c>,
    blacklist: FxHashSet<Vec<usize>>,
    best_distance: f64,
    phase: GreedyPhase,
}

impl<'c> SearchState<'c> {
    fn new(composer: &'c UnitaryComposer, num_qubits: u32) -> Self {
        Self {
            stack: CompositionStack::new(composer, num_qubits),
            blacklist: FxHashSet::default(),
            best_distance: f64::INFINITY,
            phase: GreedyPhase::Building,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> GreedyPhase {
        self.phase
    }

    /// Distance of the last accepted step; infinite before any attempt.
    pub fn best_distance(&self) -> f64 {
        self.best_distance
    }

    /// First choices rejected at the current (or last) depth.
    pub fn blacklist_len(&self) -> usize {
        self.blacklist.len()
    }

    /// The circuit under construction.
    pub fn circuit(&self) -> &Circuit {
        self.stack.circuit()
    }
}

/// Greedy heuristic search for a circuit approximating a target.
#[derive(Debug, Clone)]
pub struct GreedySearch<'a> {
    composer: &'a UnitaryComposer,
    target: &'a Unitary,
    moves: MoveSet,
    epsilon: f64,
}

impl<'a> GreedySearch<'a> {
    /// Set up a search for `target` on `num_qubits` qubits.
    pub fn new(
        composer: &'a UnitaryComposer,
        target: &'a Unitary,
        catalog: &GateCatalog,
        num_qubits: u32,
        epsilon: f64,
    ) -> SearchResult<Self> {
        check_problem(target, num_qubits, epsilon)?;
        Ok(Self {
            composer,
            target,
            moves: MoveSet::new(catalog, num_qubits)?,
            epsilon,
        })
    }

    /// The move set being searched.
    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    /// Search for a circuit of at most `max_depth` placements.
    pub fn run(&self, max_depth: usize) -> SearchResult<SearchOutcome> {
        self.run_with_state(max_depth).map(|(outcome, _)| outcome)
    }

    /// Like [`run`](Self::run), also returning the final search state.
    pub fn run_with_state(
        &self,
        max_depth: usize,
    ) -> SearchResult<(SearchOutcome, SearchState<'a>)> {
        info!(
            moves = self.moves.len(),
            max_depth,
            epsilon = self.epsilon,
            "starting greedy search"
        );
        let started = Instant::now();
        let cache_before = self.composer.cache().stats();
        let mut stats = SearchStats::default();
        let mut state = SearchState::new(self.composer, self.moves.num_qubits());

        let mut found = None;
        let mut depth = 0;
        while state.phase == GreedyPhase::Building {
            if depth == max_depth {
                state.phase = GreedyPhase::Exhausted;
            } else {
                found = self.search_depth(&mut state, depth, max_depth, &mut stats)?;
                depth += 1;
            }
        }

        stats.record_cache(cache_before, self.composer.cache().stats());
        stats.elapsed = started.elapsed();
        let outcome = match found {
            Some(solution) => {
                info!(
                    gates = solution.len(),
                    distance = solution.distance,
                    attempts = stats.attempts,
                    evaluated = stats.evaluated,
                    "greedy search converged"
                );
                SearchOutcome::Found { solution, stats }
            }
            None => {
                info!(
                    attempts = stats.attempts,
                    evaluated = stats.evaluated,
                    best_distance = stats.best_distance,
                    "greedy search exhausted"
                );
                SearchOutcome::Exhausted { stats }
            }
        };
        Ok((outcome, state))
    }

    /// All attempts whose first choice has `depth + 1` moves.
    fn search_depth(
        &self,
        state: &mut SearchState<'_>,
        depth: usize,
        max_depth: usize,
        stats: &mut SearchStats,
    ) -> SearchResult<Option<Solution>> {
        let block = depth + 1;
        let choices = self.moves.sequence_count(block)?;
        state.blacklist.clear();
        state.stack.truncate(0);
        let mut attempts = 0_u64;

        while (state.blacklist.len() as u64) < choices {
            let Some(first) = self.first_choice(state, block, choices, stats)? else {
                break;
            };
            attempts += 1;
            stats.attempts += 1;

            state.best_distance = distance(state.stack.seek(&self.moves, &first)?, self.target);
            trace!(
                depth,
                attempt = attempts,
                first_choice = ?first,
                distance = state.best_distance,
                "applied first choice"
            );

            while state.best_distance >= self.epsilon && state.stack.depth() < max_depth {
                let (m, d) = self.best_extension(state, stats)?;
                state.stack.push(&self.moves, m)?;
                state.best_distance = d;
            }

            if state.best_distance < self.epsilon {
                state.phase = GreedyPhase::Converged;
                debug!(depth, attempts, "greedy attempt converged");
                return Ok(Some(Solution {
                    gates: state.stack.circuit().to_triples(),
                    distance: state.best_distance,
                    candidate_index: None,
                }));
            }

            state.blacklist.insert(first);
            state.stack.truncate(0);
        }

        debug!(depth, attempts, "greedy depth exhausted");
        Ok(None)
    }

    /// Best non-blacklisted block of `block` moves applied to the empty circuit.
    fn first_choice(
        &self,
        state: &mut SearchState<'_>,
        block: usize,
        choices: u64,
        stats: &mut SearchStats,
    ) -> SearchResult<Option<Vec<usize>>> {
        let mut digits = vec![0; block];
        let mut best: Option<(Vec<usize>, f64)> = None;
        for index in 0..choices {
            self.moves.decode(index, &mut digits);
            if state.blacklist.contains(&digits) {
                continue;
            }
            let d = distance(state.stack.seek(&self.moves, &digits)?, self.target);
            stats.record(d);
            if best.as_ref().is_none_or(|(_, best_d)| d < *best_d) {
                best = Some((digits.clone(), d));
            }
        }
        Ok(best.map(|(digits, _)| digits))
    }

    /// Best single move to append to the stacked circuit, which is left as is.
    fn best_extension(
        &self,
        state: &mut SearchState<'_>,
        stats: &mut SearchStats,
    ) -> SearchResult<(usize, f64)> {
        let len = state.stack.depth();
        let mut best = (0, f64::INFINITY);
        for m in 0..self.moves.len() {
            let d = distance(state.stack.push(&self.moves, m)?, self.target);
            state.stack.truncate(len);
            stats.record(d);
            if d < best.1 {
                best = (m, d);
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatesmith_ir::Gate;
    use std::f64::consts::FRAC_PI_2;
    use std::sync::Arc;

    fn catalog() -> GateCatalog {
        GateCatalog::from_gates([Gate::rxx(FRAC_PI_2), Gate::rx(FRAC_PI_2), Gate::rx(-FRAC_PI_2)])
    }

    #[test]
    fn test_single_gate_found_on_first_attempt() {
        let composer = UnitaryComposer::new();
        let mut circuit = Circuit::new(2);
        circuit.append(Arc::new(Gate::rx(FRAC_PI_2)), 0).unwrap();
        let target = composer.compose(&circuit).unwrap();

        let search = GreedySearch::new(&composer, &target, &catalog(), 2, 1e-6).unwrap();
        let outcome = search.run(3).unwrap();
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.gates, circuit.to_triples());
        assert_eq!(outcome.stats().attempts, 1);
        assert_eq!(outcome.stats().evaluated, 5);
    }

    #[test]
    fn test_identity_target_converges_by_extension() {
        let composer = UnitaryComposer::new();
        let target = Unitary::identity(2);
        // rx+ followed by rx- on the same qubit undoes itself
        let search = GreedySearch::new(&composer, &target, &catalog(), 2, 1e-6).unwrap();
        let outcome = search.run(2).unwrap();
        let solution = outcome.solution().unwrap();
        assert_eq!(solution.len(), 2);
        assert!(solution.distance < 1e-6);
    }

    #[test]
    fn test_zero_depth_exhausts_immediately() {
        let composer = UnitaryComposer::new();
        let target = Unitary::identity(2);
        let search = GreedySearch::new(&composer, &target, &catalog(), 2, 1e-6).unwrap();
        let outcome = search.run(0).unwrap();
        assert!(!outcome.is_found());
        assert_eq!(outcome.stats().evaluated, 0);
    }

    #[test]
    fn test_state_after_convergence() {
        let composer = UnitaryComposer::new();
        let target = Unitary::identity(2);
        let search = GreedySearch::new(&composer, &target, &catalog(), 2, 1e-6).unwrap();
        let (outcome, state) = search.run_with_state(2).unwrap();

        assert_eq!(state.phase(), GreedyPhase::Converged);
        assert!(state.best_distance() < 1e-6);
        assert_eq!(state.circuit().to_triples(), outcome.solution().unwrap().gates);
        // rxx@0 was tried first and failed
        assert_eq!(state.blacklist_len(), 1);
    }

    #[test]
    fn test_state_after_exhaustion() {
        let composer = UnitaryComposer::new();
        let mut circuit = Circuit::new(2);
        circuit.append(Arc::new(Gate::rxx(FRAC_PI_2)), 0).unwrap();
        circuit.append(Arc::new(Gate::rxx(FRAC_PI_2)), 0).unwrap();
        circuit.append(Arc::new(Gate::rx(FRAC_PI_2)), 1).unwrap();
        let target = composer.compose(&circuit).unwrap();

        let search = GreedySearch::new(&composer, &target, &catalog(), 2, 1e-6).unwrap();
        let (outcome, state) = search.run_with_state(1).unwrap();
        assert!(!outcome.is_found());
        assert_eq!(state.phase(), GreedyPhase::Exhausted);
        assert_eq!(state.blacklist_len(), 5);
        assert!(state.circuit().is_empty());
        assert!(state.best_distance() > 1e-6);
    }

    #[test]
    fn test_zero_depth_state_is_exhausted() {
        let composer = UnitaryComposer::new();
        let target = Unitary::identity(2);
        let search = GreedySearch::new(&composer, &target, &catalog(), 2, 1e-6).unwrap();
        let (_, state) = search.run_with_state(0).unwrap();
        assert_eq!(state.phase(), GreedyPhase::Exhausted);
        assert!(state.best_distance().is_infinite());
        assert_eq!(state.blacklist_len(), 0);
    }
}
