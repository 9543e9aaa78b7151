//! Append-only circuits of placed gates.

use std::sync::Arc;

use crate::error::{IrError, IrResult};
use crate::export::GateTriple;
use crate::gate::Gate;

/// A gate bound to the first qubit it acts on.
///
/// A gate of span `k` placed at `offset` acts on qubits
/// `offset..offset + k` (adjacent qubits, linear topology).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGate {
    /// The gate.
    pub gate: Arc<Gate>,
    /// First qubit the gate acts on.
    pub offset: u32,
}

impl PlacedGate {
    /// Create a placement without validating it against a circuit.
    pub fn new(gate: Arc<Gate>, offset: u32) -> Self {
        Self { gate, offset }
    }

    /// Whether the placement fits into a register of `num_qubits` qubits.
    #[inline]
    pub fn fits(&self, num_qubits: u32) -> bool {
        self.offset
            .checked_add(self.gate.num_qubits())
            .is_some_and(|end| end <= num_qubits)
    }

    /// The placement as a plain `(kind, parameter, offset)` triple.
    pub fn to_triple(&self) -> GateTriple {
        GateTriple {
            kind: self.gate.kind(),
            theta: self.gate.parameter(),
            offset: self.offset,
        }
    }
}

/// An ordered sequence of placed gates over a fixed number of qubits.
///
/// Insertion order is composition order: the first appended gate is applied
/// first. The circuit only grows by [`Circuit::append`] and shrinks by
/// [`Circuit::pop`] / [`Circuit::truncate`], which is how searches undo
/// tentative extensions without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    num_qubits: u32,
    ops: Vec<PlacedGate>,
}

impl Circuit {
    /// Create an empty circuit on `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            ops: vec![],
        }
    }

    /// Create an empty circuit with room for `capacity` placements.
    pub fn with_capacity(num_qubits: u32, capacity: usize) -> Self {
        Self {
            num_qubits,
            ops: Vec::with_capacity(capacity),
        }
    }

    /// Append `gate` starting at qubit `offset`.
    ///
    /// Fails with [`IrError::InvalidPlacement`] if the gate would extend past
    /// the last qubit; the circuit is left unchanged in that case.
    pub fn append(&mut self, gate: Arc<Gate>, offset: u32) -> IrResult<&mut Self> {
        self.push(PlacedGate::new(gate, offset))?;
        Ok(self)
    }

    /// Append an existing placement, with the same validation as [`Circuit::append`].
    pub fn push(&mut self, placed: PlacedGate) -> IrResult<()> {
        if !placed.fits(self.num_qubits) {
            return Err(IrError::InvalidPlacement {
                gate: placed.gate.name(),
                offset: placed.offset,
                span: placed.gate.num_qubits(),
                num_qubits: self.num_qubits,
            });
        }
        self.ops.push(placed);
        Ok(())
    }

    /// Remove the last `k` placements (all of them if `k > len`).
    pub fn pop(&mut self, k: usize) {
        let len = self.ops.len().saturating_sub(k);
        self.ops.truncate(len);
    }

    /// Shorten the circuit to its first `len` placements.
    pub fn truncate(&mut self, len: usize) {
        self.ops.truncate(len);
    }

    /// Remove every placement.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of placed gates.
    #[inline]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether no gate has been placed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The placements in insertion order.
    pub fn operations(&self) -> &[PlacedGate] {
        &self.ops
    }

    /// The placements as `(kind, parameter, offset)` triples, in insertion order.
    pub fn to_triples(&self) -> Vec<GateTriple> {
        self.ops.iter().map(PlacedGate::to_triple).collect()
    }
}
