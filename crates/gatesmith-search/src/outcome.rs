//! Search results and statistics.

use std::time::Duration;

use gatesmith_ir::{CacheStats, Circuit, GateTriple, IrResult, QubitOrder, import_triples};
use serde::{Deserialize, Serialize};

/// A circuit that approximates the target within tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Placements in insertion order, native qubit order.
    pub gates: Vec<GateTriple>,
    /// Distance between the circuit's unitary and the target.
    pub distance: f64,
    /// Global enumeration index for exhaustive searches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate_index: Option<u64>,
}

impl Solution {
    /// Number of placements.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the target was matched by the empty circuit.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Rebuild the circuit on `num_qubits` qubits.
    pub fn to_circuit(&self, num_qubits: u32) -> IrResult<Circuit> {
        import_triples(num_qubits, &self.gates, QubitOrder::Native)
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Distance evaluations performed.
    pub evaluated: u64,
    /// Greedy first choices tried. Zero for exhaustive searches.
    pub attempts: u64,
    /// Smallest distance observed.
    pub best_distance: Option<f64>,
    /// Expansion cache hits during the search.
    pub cache_hits: u64,
    /// Expansion cache misses during the search.
    pub cache_misses: u64,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

impl SearchStats {
    /// Count one evaluation at `distance`.
    #[inline]
    pub fn record(&mut self, distance: f64) {
        self.evaluated += 1;
        if self.best_distance.is_none_or(|best| distance < best) {
            self.best_distance = Some(distance);
        }
    }

    /// Fold the cache counters accumulated since `before` into the stats.
    pub fn record_cache(&mut self, before: CacheStats, after: CacheStats) {
        self.cache_hits += after.hits.saturating_sub(before.hits);
        self.cache_misses += after.misses.saturating_sub(before.misses);
    }

    /// Merge another worker's counters. Elapsed time is the maximum.
    pub fn absorb(&mut self, other: &SearchStats) {
        self.evaluated += other.evaluated;
        self.attempts += other.attempts;
        if let Some(d) = other.best_distance {
            if self.best_distance.is_none_or(|best| d < best) {
                self.best_distance = Some(d);
            }
        }
        self.cache_hits += other.cache_hits;
        self.cache_misses += other.cache_misses;
        self.elapsed = self.elapsed.max(other.elapsed);
    }
}

/// Result of a search. Exhaustion is a normal negative answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// A circuit within tolerance was found.
    Found {
        /// The circuit.
        solution: Solution,
        /// Counters.
        stats: SearchStats,
    },
    /// The search space was exhausted without success.
    Exhausted {
        /// Counters.
        stats: SearchStats,
    },
}

impl SearchOutcome {
    /// Whether a solution was found.
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    /// The solution, if any.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Found { solution, .. } => Some(solution),
            SearchOutcome::Exhausted { .. } => None,
        }
    }

    /// The counters.
    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Found { stats, .. } | SearchOutcome::Exhausted { stats } => stats,
        }
    }
}
