//! gatesmith demo suite
//!
//! Runnable demonstrations of gate-sequence synthesis:
//!
//! - **demo-synthesize**: run whatever search a YAML file and the
//!   `GATESMITH_*` environment describe, then print the circuit as JSON
//! - **demo-compare**: greedy against sharded exhaustive search on the
//!   standard two-qubit targets
//!
//! Logging goes through `tracing`; set `RUST_LOG=debug` for per-depth detail.

pub mod targets;

use console::style;
use gatesmith_ir::{GateTriple, QubitOrder, export_triples, triples_to_json};
use gatesmith_search::{SearchOutcome, SearchResult};
use serde::Serialize;

/// Install the `tracing` subscriber, honouring `RUST_LOG` and defaulting to `info`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a failure message.
pub fn print_failure(message: &str) {
    println!("{} {}", style("✗").red().bold(), message);
}

/// Machine-readable summary of one search.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Label of the run.
    pub label: String,
    /// Whether a circuit was found.
    pub found: bool,
    /// Distance of the found circuit.
    pub distance: Option<f64>,
    /// Gates in native qubit order.
    pub native: Vec<GateTriple>,
    /// Gates in reversed (little-endian) qubit order.
    pub reversed: Vec<GateTriple>,
    /// Candidates evaluated.
    pub evaluated: u64,
    /// Wall-clock milliseconds.
    pub elapsed_ms: u128,
}

impl RunSummary {
    /// Summarize `outcome` of a search on `num_qubits` qubits.
    pub fn new(label: &str, num_qubits: u32, outcome: &SearchOutcome) -> SearchResult<Self> {
        let (native, reversed, distance) = match outcome.solution() {
            Some(solution) => {
                let circuit = solution.to_circuit(num_qubits)?;
                (
                    export_triples(&circuit, QubitOrder::Native),
                    export_triples(&circuit, QubitOrder::Reversed),
                    Some(solution.distance),
                )
            }
            None => (vec![], vec![], None),
        };
        Ok(Self {
            label: label.to_string(),
            found: outcome.is_found(),
            distance,
            native,
            reversed,
            evaluated: outcome.stats().evaluated,
            elapsed_ms: outcome.stats().elapsed.as_millis(),
        })
    }

    /// Print the summary in human form.
    pub fn print(&self) {
        print_section(&self.label);
        if self.found {
            print_success(&format!("found {} gate(s)", self.native.len()));
            if let Some(d) = self.distance {
                print_result("Distance", format!("{d:.3e}"));
            }
            match triples_to_json(&self.native) {
                Ok(json) => print_result("Gates", json),
                Err(e) => print_failure(&format!("could not encode gates: {e}")),
            }
        } else {
            print_failure("search space exhausted");
        }
        print_result("Evaluated", self.evaluated);
        print_result("Elapsed", format!("{} ms", self.elapsed_ms));
    }
}
