//! Greedy against exhaustive search on the standard two-qubit targets.
//!
//! Uses the hardware-native catalog. Greedy first-choice scans grow
//! quadratically with the block size once a target is out of reach, so the
//! greedy run has its own, smaller depth limit. The exhaustive search runs
//! every shard of a `--workers` layout on the local thread pool. Both
//! strategies share one composer and its expansion cache.

use anyhow::Result;
use clap::Parser;

use gatesmith_demos::{RunSummary, init_logging, print_header, print_result, targets};
use gatesmith_ir::{GateCatalog, UnitaryComposer};
use gatesmith_search::{ExhaustiveSearch, GreedySearch, LocalShardPool, SearchConfig, ShardConfig};

const NUM_QUBITS: u32 = 2;

#[derive(Parser, Debug)]
#[command(name = "demo-compare")]
#[command(about = "Compare greedy and exhaustive gate-sequence search")]
struct Args {
    /// Maximum sequence length for the exhaustive search
    #[arg(short = 'd', long, env = "GATESMITH_MAX_DEPTH", default_value = "5")]
    max_depth: usize,

    /// Maximum sequence length for the greedy search
    #[arg(short, long, default_value = "3")]
    greedy_depth: usize,

    /// Distance below which a circuit is accepted
    #[arg(short, long, env = "GATESMITH_EPSILON", default_value = "1e-6")]
    epsilon: f64,

    /// Number of shards the exhaustive search is split into
    #[arg(short, long, env = "GATESMITH_WORLD_SIZE", default_value = "4")]
    workers: u64,

    /// Targets to compare
    #[arg(short, long, value_delimiter = ',', default_values = ["cnot", "signed_cnot", "swap"])]
    targets: Vec<String>,
}

impl Args {
    fn config(&self) -> Result<SearchConfig> {
        let config = SearchConfig {
            num_qubits: NUM_QUBITS,
            max_depth: self.max_depth,
            epsilon: self.epsilon,
            shard: ShardConfig {
                rank: 0,
                size: self.workers,
            },
            ..SearchConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = args.config()?;

    print_header("gatesmith: greedy vs exhaustive");
    let catalog = GateCatalog::hardware_native();
    print_result("Catalog size", catalog.len());
    print_result("Max depth", config.max_depth);
    print_result("Greedy depth", args.greedy_depth);
    print_result("Workers", config.shard.size);

    let composer = UnitaryComposer::new();
    let pool = LocalShardPool::new(config.shard.size)?;
    let mut summaries = vec![];

    for name in &args.targets {
        let target = targets::by_name(name)?;

        let greedy = GreedySearch::new(&composer, &target, &catalog, NUM_QUBITS, config.epsilon)?
            .run(args.greedy_depth.min(config.max_depth))?;
        let summary = RunSummary::new(&format!("{name} / greedy"), NUM_QUBITS, &greedy)?;
        summary.print();
        summaries.push(summary);

        let search =
            ExhaustiveSearch::new(&composer, &target, &catalog, NUM_QUBITS, config.epsilon)?;
        let exhaustive = pool.run_up_to(&search, config.max_depth)?.into_outcome();
        let summary = RunSummary::new(&format!("{name} / exhaustive"), NUM_QUBITS, &exhaustive)?;
        summary.print();
        summaries.push(summary);
    }

    let cache = composer.cache().stats();
    print_result("Cache entries", cache.entries);
    print_result("Cache hits", cache.hits);
    print_result("Cache misses", cache.misses);

    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}
