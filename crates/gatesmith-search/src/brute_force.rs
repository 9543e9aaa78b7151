//! Exhaustive enumeration of fixed-length gate sequences.
//!
//! Every sequence of `depth` moves is a candidate, numbered in lexicographic
//! order (first move most significant). A worker with shard `rank/size` scores
//! exactly the candidates whose index is `rank` modulo `size`, so running all
//! ranks covers the space once with no coordination. The first owned candidate
//! closer than `epsilon` to the target wins.
//!
//! Consecutive owned candidates usually share a long prefix. The scan keeps a
//! [`CompositionStack`] of prefix products and only recomposes the suffix that
//! changed.

use std::time::Instant;

use gatesmith_ir::{GateCatalog, Unitary, UnitaryComposer, distance};
use tracing::{debug, info};

use crate::error::SearchResult;
use crate::moves::{CompositionStack, MoveSet, check_problem};
use crate::outcome::{SearchOutcome, SearchStats, Solution};
use crate::shard::Shard;

/// Brute-force search over one shard of the candidate space.
#[derive(Debug, Clone)]
pub struct ExhaustiveSearch<'a> {
    composer: &'a UnitaryComposer,
    target: &'a Unitary,
    moves: MoveSet,
    epsilon: f64,
    shard: Shard,
}

impl<'a> ExhaustiveSearch<'a> {
    /// Set up a single-worker search for `target` on `num_qubits` qubits.
    ///
    /// Fails if the target has the wrong dimension, `epsilon` is not a
    /// positive finite number, or no catalog gate fits the register.
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
            shard: Shard::single(),
        })
    }

    /// Restrict the search to one shard.
    #[must_use]
    pub fn with_shard(mut self, shard: Shard) -> Self {
        self.shard = shard;
        self
    }

    /// The shard being searched.
    pub fn shard(&self) -> Shard {
        self.shard
    }

    /// The move set being enumerated.
    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    /// Search sequences of exactly `depth` moves.
    ///
    /// `depth == 0` scores the empty circuit, i.e. the identity, as candidate 0.
    pub fn run(&self, depth: usize) -> SearchResult<SearchOutcome> {
        self.run_lengths(depth..=depth)
    }

    /// Search sequences of every length `0..=max_depth`, shortest first.
    ///
    /// Length 0 is the empty circuit, so an identity target (up to phase)
    /// is reported as found with no gates, matching `run(0)`.
    pub fn run_up_to(&self, max_depth: usize) -> SearchResult<SearchOutcome> {
        self.run_lengths(0..=max_depth)
    }

    fn run_lengths(
        &self,
        lengths: std::ops::RangeInclusive<usize>,
    ) -> SearchResult<SearchOutcome> {
        info!(
            shard = %self.shard,
            moves = self.moves.len(),
            min_depth = *lengths.start(),
            max_depth = *lengths.end(),
            epsilon = self.epsilon,
            "starting exhaustive search"
        );
        let started = Instant::now();
        let cache_before = self.composer.cache().stats();
        let mut stats = SearchStats::default();

        let mut found = None;
        for depth in lengths {
            if let Some(solution) = self.scan(depth, &mut stats)? {
                found = Some(solution);
                break;
            }
        }

        stats.record_cache(cache_before, self.composer.cache().stats());
        stats.elapsed = started.elapsed();
        let outcome = match found {
            Some(solution) => {
                info!(
                    shard = %self.shard,
                    gates = solution.len(),
                    distance = solution.distance,
                    candidate = solution.candidate_index,
                    evaluated = stats.evaluated,
                    "exhaustive search found a circuit"
                );
                SearchOutcome::Found { solution, stats }
            }
            None => {
                info!(
                    shard = %self.shard,
                    evaluated = stats.evaluated,
                    best_distance = stats.best_distance,
                    "exhaustive search exhausted"
                );
                SearchOutcome::Exhausted { stats }
            }
        };
        Ok(outcome)
    }

    fn scan(&self, depth: usize, stats: &mut SearchStats) -> SearchResult<Option<Solution>> {
        let total = self.moves.sequence_count(depth)?;
        debug!(
            depth,
            total,
            owned = self.shard.count(total),
            "scanning sequence length"
        );

        let mut stack = CompositionStack::new(self.composer, self.moves.num_qubits());
        let mut digits = vec![0; depth];
        for index in self.shard.indices(total) {
            self.moves.decode(index, &mut digits);
            let d = distance(stack.seek(&self.moves, &digits)?, self.target);
            stats.record(d);
            if d < self.epsilon {
                return Ok(Some(Solution {
                    gates: stack.circuit().to_triples(),
                    distance: d,
                    candidate_index: Some(index),
                }));
            }
        }
        Ok(None)
    }
}
