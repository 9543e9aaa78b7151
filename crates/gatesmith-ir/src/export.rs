//! Gate-triple exchange format for external toolchains.
//!
//! A synthesized circuit leaves this crate as an ordered list of
//! `(gate kind, parameter, qubit offset)` triples. Inside the crate qubit 0 is
//! the left-most Kronecker factor ([`QubitOrder::Native`]). Toolchains that
//! number qubits little-endian expect [`QubitOrder::Reversed`], where a gate of
//! span `k` at native offset `p` starts at `n - p - k` (`n - 1 - p` for
//! single-qubit gates). The conversion happens here and nowhere else.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::gate::{Gate, GateKind};

/// One placed gate in exchange form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateTriple {
    /// Gate kind.
    pub kind: GateKind,
    /// Rotation angle.
    pub theta: f64,
    /// First qubit the gate acts on, in the order of the surrounding context.
    pub offset: u32,
}

/// Qubit numbering convention of an exchanged triple list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QubitOrder {
    /// Qubit 0 is the most significant tensor factor. Used by this crate.
    #[default]
    Native,
    /// Qubit 0 is the least significant tensor factor.
    Reversed,
}

impl QubitOrder {
    /// Translate a native offset of a gate with `span` qubits into this order.
    ///
    /// The mapping is an involution, so it also translates back.
    #[inline]
    pub fn map_offset(self, offset: u32, span: u32, num_qubits: u32) -> u32 {
        match self {
            QubitOrder::Native => offset,
            QubitOrder::Reversed => num_qubits - offset - span,
        }
    }
}

/// Export the circuit's placements in the requested qubit order.
pub fn export_triples(circuit: &Circuit, order: QubitOrder) -> Vec<GateTriple> {
    let n = circuit.num_qubits();
    circuit
        .operations()
        .iter()
        .map(|op| {
            let mut triple = op.to_triple();
            triple.offset = order.map_offset(op.offset, op.gate.num_qubits(), n);
            triple
        })
        .collect()
}

/// Rebuild a circuit from triples given in `order`.
///
/// Fails with the same placement errors as [`Circuit::append`].
pub fn import_triples(
    num_qubits: u32,
    triples: &[GateTriple],
    order: QubitOrder,
) -> IrResult<Circuit> {
    let mut circuit = Circuit::with_capacity(num_qubits, triples.len());
    for triple in triples {
        let gate = Gate::with_angle(triple.kind, triple.theta);
        let span = gate.num_qubits();
        let offset = match order {
            QubitOrder::Native => triple.offset,
            // Out-of-range reversed offsets fall through to append's check
            QubitOrder::Reversed => num_qubits
                .checked_sub(triple.offset)
                .and_then(|v| v.checked_sub(span))
                .unwrap_or(u32::MAX),
        };
        circuit.append(Arc::new(gate), offset)?;
    }
    Ok(circuit)
}

/// Serialize triples to pretty JSON.
pub fn triples_to_json(triples: &[GateTriple]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(triples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IrError;
    use std::f64::consts::PI;

    fn sample() -> Circuit {
        let mut circuit = Circuit::new(3);
        circuit.append(Arc::new(Gate::rx(PI / 2.0)), 0).unwrap();
        circuit.append(Arc::new(Gate::rxx(PI / 2.0)), 0).unwrap();
        circuit.append(Arc::new(Gate::rz(-PI / 2.0)), 2).unwrap();
        circuit
    }

    #[test]
    fn test_reversed_offsets() {
        let triples = export_triples(&sample(), QubitOrder::Reversed);
        assert_eq!(triples[0].offset, 2);
        assert_eq!(triples[1].offset, 1);
        assert_eq!(triples[2].offset, 0);
    }

    #[test]
    fn test_round_trip_in_both_orders() {
        let circuit = sample();
        for order in [QubitOrder::Native, QubitOrder::Reversed] {
            let triples = export_triples(&circuit, order);
            let back = import_triples(3, &triples, order).unwrap();
            assert_eq!(back, circuit);
        }
    }

    #[test]
    fn test_import_rejects_out_of_range_offset() {
        let triples = [GateTriple {
            kind: GateKind::Rxx,
            theta: 0.1,
            offset: 2,
        }];
        assert!(matches!(
            import_triples(2, &triples, QubitOrder::Reversed),
            Err(IrError::InvalidPlacement { .. })
        ));
        assert!(matches!(
            import_triples(2, &triples, QubitOrder::Native),
            Err(IrError::InvalidPlacement { .. })
        ));
    }

    #[test]
    fn test_json_shape() {
        let json = triples_to_json(&export_triples(&sample(), QubitOrder::Native)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["kind"], "rxx");
        assert_eq!(value[2]["offset"], 2);
    }
}
