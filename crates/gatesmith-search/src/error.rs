//! Error types for the search crate.

use thiserror::Error;

/// Errors produced while setting up or running a search.
///
/// Not finding a circuit is not an error; see
/// [`SearchOutcome::Exhausted`](crate::SearchOutcome::Exhausted).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Circuit construction or composition failed.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] gatesmith_ir::IrError),

    /// Worker index outside the worker count, or zero workers.
    #[error("Invalid shard: rank {rank} with {size} worker(s)")]
    InvalidShard {
        /// Worker index.
        rank: u64,
        /// Worker count.
        size: u64,
    },

    /// Target operator does not act on the searched number of qubits.
    #[error("Target is {got}x{got} but a {num_qubits}-qubit search needs {expected}x{expected}")]
    TargetDimension {
        /// Number of qubits being searched.
        num_qubits: u32,
        /// Required dimension.
        expected: usize,
        /// Dimension of the supplied target.
        got: usize,
    },

    /// `moves^depth` does not fit the candidate index type.
    #[error("Search space of {moves}^{depth} candidates is too large to enumerate")]
    SearchSpaceTooLarge {
        /// Number of single-step moves.
        moves: usize,
        /// Sequence length.
        depth: usize,
    },

    /// Tolerance is not a positive finite number.
    #[error("epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f64),

    /// No gate of the catalog fits the register.
    #[error("No gate of the catalog fits a {0}-qubit register")]
    NoMoves(u32),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;
