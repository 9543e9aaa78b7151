//! Configuration-driven synthesis.
//!
//! Reads the search configuration from a YAML file (defaults otherwise),
//! applies the `GATESMITH_*` environment overrides, then any command-line
//! flags, and runs the configured strategy. Without a `target` in the file,
//! the named target is used.
//!
//! ```text
//! demo-synthesize --config search.yaml --target swap --rank 0 --world-size 4
//! ```
//!
//! Prints a human summary followed by one line of JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use gatesmith_demos::{RunSummary, init_logging, print_header, print_result, targets};
use gatesmith_ir::UnitaryComposer;
use gatesmith_search::SearchConfig;

#[derive(Parser, Debug)]
#[command(name = "demo-synthesize")]
#[command(about = "Search for a gate sequence approximating a target unitary")]
struct Args {
    /// YAML search configuration
    #[arg(short, long, env = "GATESMITH_CONFIG")]
    config: Option<PathBuf>,

    /// Named target, used when the configuration has none
    #[arg(short, long, env = "GATESMITH_TARGET", default_value = "cnot")]
    target: String,

    /// Maximum sequence length
    #[arg(short = 'd', long)]
    max_depth: Option<usize>,

    /// Distance below which a circuit is accepted
    #[arg(short, long)]
    epsilon: Option<f64>,

    /// Shard index of this worker
    #[arg(long)]
    rank: Option<u64>,

    /// Number of workers sharing the search space
    #[arg(long)]
    world_size: Option<u64>,
}

impl Args {
    /// Flags take precedence over the file and the environment.
    fn apply(&self, mut config: SearchConfig) -> Result<SearchConfig> {
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(rank) = self.rank {
            config.shard.rank = rank;
        }
        if let Some(size) = self.world_size {
            config.shard.size = size;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = SearchConfig::load(args.config.as_deref())
        .with_context(|| format!("loading configuration from {:?}", args.config))?;
    let config = args.apply(config)?;

    let target = match config.target_unitary()? {
        Some(target) => target,
        None => targets::by_name(&args.target)?,
    };

    print_header("gatesmith: gate-sequence synthesis");
    print_result("Qubits", config.num_qubits);
    print_result("Strategy", format!("{:?}", config.strategy));
    print_result("Max depth", config.max_depth);
    print_result("Epsilon", config.epsilon);
    print_result("Shard", config.shard()?);
    print_result("Catalog size", config.catalog().len());
    if config.target.is_none() {
        print_result("Target", &args.target);
    }

    info!(strategy = ?config.strategy, "running configured search");
    let composer = UnitaryComposer::new();
    let outcome = config.run(&composer, &target)?;

    let summary = RunSummary::new("Result", config.num_qubits, &outcome)?;
    summary.print();
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
