//! Running every shard of a layout in one process.
//!
//! Each rank runs as an independent [`ExhaustiveSearch`] on the rayon pool,
//! sharing one composer and its expansion cache. Shards do not cancel each
//! other: a rank that finds a circuit early does not stop the others.

use rayon::prelude::*;
use tracing::info;

use crate::brute_force::ExhaustiveSearch;
use crate::error::{SearchError, SearchResult};
use crate::outcome::{SearchOutcome, SearchStats, Solution};
use crate::shard::Shard;

/// A local stand-in for a multi-process worker layout.
#[derive(Debug, Clone, Copy)]
pub struct LocalShardPool {
    size: u64,
    threads: Option<usize>,
}

impl LocalShardPool {
    /// A layout of `size` workers.
    pub fn new(size: u64) -> SearchResult<Self> {
        if size == 0 {
            return Err(SearchError::InvalidShard { rank: 0, size });
        }
        Ok(Self {
            size,
            threads: None,
        })
    }

    /// Run on a dedicated pool of `threads` threads instead of the global one.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Worker count.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Run every shard on sequences of exactly `depth` moves.
    pub fn run(&self, search: &ExhaustiveSearch<'_>, depth: usize) -> SearchResult<ShardedOutcome> {
        self.dispatch(|shard| search.clone().with_shard(shard).run(depth))
    }

    /// Run every shard on sequences of length `0..=max_depth`.
    pub fn run_up_to(
        &self,
        search: &ExhaustiveSearch<'_>,
        max_depth: usize,
    ) -> SearchResult<ShardedOutcome> {
        self.dispatch(|shard| search.clone().with_shard(shard).run_up_to(max_depth))
    }

    fn dispatch<F>(&self, job: F) -> SearchResult<ShardedOutcome>
    where
        F: Fn(Shard) -> SearchResult<SearchOutcome> + Sync,
    {
        let shards = Shard::all(self.size)?;
        let work = || -> SearchResult<Vec<ShardReport>> {
            shards
                .into_par_iter()
                .map(|shard| job(shard).map(|outcome| ShardReport { shard, outcome }))
                .collect()
        };
        let reports = match self.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| SearchError::Config(format!("thread pool: {e}")))?
                .install(work)?,
            None => work()?,
        };

        let outcome = ShardedOutcome { reports };
        info!(
            size = self.size,
            found = outcome.is_found(),
            evaluated = outcome.total_evaluated(),
            "all shards finished"
        );
        Ok(outcome)
    }
}

/// One shard's result.
#[derive(Debug, Clone)]
pub struct ShardReport {
    /// The shard.
    pub shard: Shard,
    /// Its outcome.
    pub outcome: SearchOutcome,
}

/// Results of all shards of a layout, in rank order.
#[derive(Debug, Clone)]
pub struct ShardedOutcome {
    reports: Vec<ShardReport>,
}

impl ShardedOutcome {
    /// Per-shard reports, in rank order.
    pub fn reports(&self) -> &[ShardReport] {
        &self.reports
    }

    /// Whether any shard found a circuit.
    pub fn is_found(&self) -> bool {
        self.reports.iter().any(|r| r.outcome.is_found())
    }

    /// The solution a single worker would have reported: shortest first,
    /// then lowest candidate index.
    pub fn best(&self) -> Option<&Solution> {
        self.reports
            .iter()
            .filter_map(|r| r.outcome.solution())
            .min_by_key(|s| (s.len(), s.candidate_index))
    }

    /// Candidates evaluated across all shards.
    pub fn total_evaluated(&self) -> u64 {
        self.reports.iter().map(|r| r.outcome.stats().evaluated).sum()
    }

    /// Merged counters of all shards.
    pub fn stats(&self) -> SearchStats {
        let mut stats = SearchStats::default();
        for report in &self.reports {
            stats.absorb(report.outcome.stats());
        }
        stats
    }

    /// Collapse into a single outcome carrying [`best`](Self::best).
    pub fn into_outcome(self) -> SearchOutcome {
        let stats = self.stats();
        match self.best().cloned() {
            Some(solution) => SearchOutcome::Found { solution, stats },
            None => SearchOutcome::Exhausted { stats },
        }
    }
}
