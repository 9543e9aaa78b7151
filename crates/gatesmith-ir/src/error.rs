//! Error types for the IR crate.

use thiserror::Error;

use crate::gate::GateKind;

/// Errors that can occur while building circuits or composing unitaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A gate placement would run past the last qubit of the circuit.
    #[error(
        "Cannot place {gate} (span {span}) at offset {offset} in a {num_qubits}-qubit circuit"
    )]
    InvalidPlacement {
        /// Name of the gate being placed.
        gate: &'static str,
        /// Requested starting qubit.
        offset: u32,
        /// Number of qubits the gate acts on.
        span: u32,
        /// Number of qubits in the circuit.
        num_qubits: u32,
    },

    /// Gate constructed with the wrong number of parameters.
    #[error("Gate '{}' takes {expected} parameter(s), got {got}", .kind.name())]
    InvalidParameterCount {
        /// The gate kind being constructed.
        kind: GateKind,
        /// Number of parameters the gate takes.
        expected: usize,
        /// Number of parameters supplied.
        got: usize,
    },

    /// Unitary requested for a circuit without operations.
    #[error("Cannot compute the unitary of a circuit with no operations")]
    EmptyCircuit,

    /// Matrix rows have inconsistent lengths or do not form a square.
    #[error("Matrix is not square: {rows} rows, row {row} has {len} entries")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Index of the offending row.
        row: usize,
        /// Length of the offending row.
        len: usize,
    },

    /// Matrix dimension is not a power of two, so it is not a qubit operator.
    #[error("Matrix dimension {0} is not a power of two")]
    DimensionNotPowerOfTwo(usize),

    /// Two operators of different size were combined.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        got: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
