//! Search configuration.
//!
//! Sources, highest precedence first:
//! 1. Environment variables (`GATESMITH_` prefix)
//! 2. Configuration file (YAML)
//! 3. Default values
//!
//! ```yaml
//! num_qubits: 2
//! max_depth: 3
//! epsilon: 0.01
//! strategy: exhaustive
//! shard: { rank: 0, size: 4 }
//! gates:
//!   - { kind: rxx, theta: 1.5707963267948966 }
//!   - { kind: rx, theta: 1.5707963267948966 }
//! target:
//!   - [[1, 0], [0, 0], [0, 0], [0, 0]]
//!   - [[0, 0], [0, 0], [1, 0], [0, 0]]
//!   - [[0, 0], [1, 0], [0, 0], [0, 0]]
//!   - [[0, 0], [0, 0], [0, 0], [1, 0]]
//! ```

use std::path::Path;

use gatesmith_ir::{Gate, GateCatalog, GateKind, Unitary, UnitaryComposer};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::brute_force::ExhaustiveSearch;
use crate::error::{SearchError, SearchResult};
use crate::greedy::GreedySearch;
use crate::outcome::SearchOutcome;
use crate::shard::Shard;

/// Worker index variable.
pub const ENV_RANK: &str = "GATESMITH_RANK";
/// Worker count variable.
pub const ENV_WORLD_SIZE: &str = "GATESMITH_WORLD_SIZE";
/// Maximum sequence length variable.
pub const ENV_MAX_DEPTH: &str = "GATESMITH_MAX_DEPTH";
/// Tolerance variable.
pub const ENV_EPSILON: &str = "GATESMITH_EPSILON";

/// Which search to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Brute force over sequences of exactly `max_depth` gates.
    #[default]
    Exhaustive,
    /// Brute force over every length `0..=max_depth`, shortest first.
    ExhaustiveUpTo,
    /// Greedy depth-first search with blacklist backtracking.
    Greedy,
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateSpec {
    /// Gate kind.
    pub kind: GateKind,
    /// Rotation angle.
    pub theta: f64,
}

/// Worker layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardConfig {
    /// Worker index.
    #[serde(default)]
    pub rank: u64,
    /// Worker count.
    #[serde(default = "default_size")]
    pub size: u64,
}

impl Default for ShardConfig {
    fn default() -> Self {
        Self {
            rank: 0,
            size: default_size(),
        }
    }
}

/// Complete search configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Register size.
    #[serde(default = "default_num_qubits")]
    pub num_qubits: u32,

    /// Sequence length (exact or maximum, depending on the strategy).
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Distance below which a circuit is accepted.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Search strategy.
    #[serde(default)]
    pub strategy: Strategy,

    /// Worker layout; ignored by the greedy strategy.
    #[serde(default)]
    pub shard: ShardConfig,

    /// Allowed gates. Empty selects the hardware-native catalog.
    #[serde(default)]
    pub gates: Vec<GateSpec>,

    /// Target matrix as rows of `[re, im]` pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Vec<Vec<[f64; 2]>>>,
}

fn default_num_qubits() -> u32 {
    2
}

fn default_max_depth() -> usize {
    3
}

fn default_epsilon() -> f64 {
    0.01
}

fn default_size() -> u64 {
    1
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            num_qubits: default_num_qubits(),
            max_depth: default_max_depth(),
            epsilon: default_epsilon(),
            strategy: Strategy::default(),
            shard: ShardConfig::default(),
            gates: vec![],
            target: None,
        }
    }
}

impl SearchConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> SearchResult<Self> {
        let config: SearchConfig =
            serde_yaml_ng::from_str(yaml).map_err(|e| SearchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> SearchResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SearchError::Config(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Load from an optional file, then apply process environment overrides.
    pub fn load(config_file: Option<&Path>) -> SearchResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`. Unparsable values are ignored.
    #[must_use]
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = parsed(&lookup, ENV_RANK) {
            self.shard.rank = v;
        }
        if let Some(v) = parsed(&lookup, ENV_WORLD_SIZE) {
            self.shard.size = v;
        }
        if let Some(v) = parsed(&lookup, ENV_MAX_DEPTH) {
            self.max_depth = v;
        }
        if let Some(v) = parsed(&lookup, ENV_EPSILON) {
            self.epsilon = v;
        }
        self
    }

    /// Check the configuration for consistency.
    pub fn validate(&self) -> SearchResult<()> {
        if self.num_qubits == 0 {
            return Err(SearchError::Config("num_qubits must be at least 1".into()));
        }
        if self.num_qubits > 12 {
            return Err(SearchError::Config(format!(
                "num_qubits = {} is beyond what dense unitaries can handle",
                self.num_qubits
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(SearchError::InvalidEpsilon(self.epsilon));
        }
        self.shard()?;
        if let Some(rows) = &self.target {
            let dim = 1_usize << self.num_qubits;
            if rows.len() != dim {
                return Err(SearchError::TargetDimension {
                    num_qubits: self.num_qubits,
                    expected: dim,
                    got: rows.len(),
                });
            }
        }
        Ok(())
    }

    /// The allowed gate catalog.
    pub fn catalog(&self) -> GateCatalog {
        if self.gates.is_empty() {
            GateCatalog::hardware_native()
        } else {
            GateCatalog::from_gates(
                self.gates
                    .iter()
                    .map(|spec| Gate::with_angle(spec.kind, spec.theta)),
            )
        }
    }

    /// This worker's shard.
    pub fn shard(&self) -> SearchResult<Shard> {
        Shard::new(self.shard.rank, self.shard.size)
    }

    /// The configured target, if any.
    pub fn target_unitary(&self) -> SearchResult<Option<Unitary>> {
        let Some(rows) = &self.target else {
            return Ok(None);
        };
        let rows: Vec<Vec<Complex64>> = rows
            .iter()
            .map(|row| row.iter().map(|&[re, im]| Complex64::new(re, im)).collect())
            .collect();
        Ok(Some(Unitary::from_rows(&rows)?))
    }

    /// Run the configured strategy against `target`.
    pub fn run(&self, composer: &UnitaryComposer, target: &Unitary) -> SearchResult<SearchOutcome> {
        let catalog = self.catalog();
        match self.strategy {
            Strategy::Exhaustive | Strategy::ExhaustiveUpTo => {
                let search =
                    ExhaustiveSearch::new(composer, target, &catalog, self.num_qubits, self.epsilon)?
                        .with_shard(self.shard()?);
                if self.strategy == Strategy::Exhaustive {
                    search.run(self.max_depth)
                } else {
                    search.run_up_to(self.max_depth)
                }
            }
            Strategy::Greedy => {
                GreedySearch::new(composer, target, &catalog, self.num_qubits, self.epsilon)?
                    .run(self.max_depth)
            }
        }
    }
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable override");
            None
        }
    }
}
