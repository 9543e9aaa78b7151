//! Property-based tests for gates, composition and the distance metric.

use std::sync::Arc;

use gatesmith_ir::{
    Circuit, Gate, GateKind, QubitOrder, Unitary, UnitaryComposer, distance, export_triples,
    import_triples,
};
use num_complex::Complex64;
use proptest::prelude::*;

fn arb_kind() -> impl Strategy<Value = GateKind> {
    prop::sample::select(GateKind::ALL.to_vec())
}

fn arb_angle() -> impl Strategy<Value = f64> {
    -10.0_f64..10.0
}

/// A random circuit on 1-4 qubits with 1-8 valid placements.
fn arb_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..=4).prop_flat_map(|num_qubits| {
        prop::collection::vec((arb_kind(), arb_angle(), 0..num_qubits), 1..=8).prop_map(
            move |ops| {
                let mut circuit = Circuit::new(num_qubits);
                for (kind, theta, q) in ops {
                    let gate = Gate::with_angle(kind, theta);
                    // Shift two-qubit gates left so they fit
                    let offset = q.min(num_qubits.saturating_sub(gate.num_qubits()));
                    let _ = circuit.append(Arc::new(gate), offset);
                }
                circuit
            },
        )
    })
}

proptest! {
    #[test]
    fn gate_unitaries_are_unitary(kind in arb_kind(), theta in arb_angle()) {
        let gate = Gate::with_angle(kind, theta);
        prop_assert!(gate.unitary().is_unitary(1e-9));
    }

    #[test]
    fn composed_circuits_are_unitary(circuit in arb_circuit()) {
        prop_assume!(!circuit.is_empty());
        let u = UnitaryComposer::new().compose(&circuit).unwrap();
        prop_assert_eq!(u.dim(), 1usize << circuit.num_qubits());
        prop_assert!(u.is_unitary(1e-9));
    }

    #[test]
    fn distance_to_self_is_zero(circuit in arb_circuit()) {
        prop_assume!(!circuit.is_empty());
        let u = UnitaryComposer::new().compose(&circuit).unwrap();
        prop_assert!(distance(&u, &u) < 1e-6);
    }

    #[test]
    fn distance_ignores_global_phase(
        a in arb_kind(), ta in arb_angle(),
        b in arb_kind(), tb in arb_angle(),
        phi in -10.0_f64..10.0,
    ) {
        // Embed both into two qubits so single- and two-qubit gates mix
        let composer = UnitaryComposer::new();
        let mut ca = Circuit::new(2);
        ca.append(Arc::new(Gate::with_angle(a, ta)), 0).unwrap();
        let mut cb = Circuit::new(2);
        cb.append(Arc::new(Gate::with_angle(b, tb)), 0).unwrap();
        let ua = composer.compose(&ca).unwrap();
        let ub = composer.compose(&cb).unwrap();

        let phased = ub.scaled(Complex64::from_polar(1.0, phi));
        let d = distance(&ua, &ub);
        let dp = distance(&ua, &phased);
        prop_assert!((d - dp).abs() < 1e-6, "d = {d}, phased = {dp}");
        prop_assert!((0.0..=1.0).contains(&d));
    }

    #[test]
    fn gate_followed_by_inverse_is_identity(
        kind in arb_kind(), theta in arb_angle(), num_qubits in 2_u32..=4, q in 0_u32..4,
    ) {
        let gate = Gate::with_angle(kind, theta);
        let offset = q.min(num_qubits - gate.num_qubits());
        let inverse = gate.inverse();
        let mut circuit = Circuit::new(num_qubits);
        circuit.append(Arc::new(gate), offset).unwrap();
        circuit.append(Arc::new(inverse), offset).unwrap();

        let u = UnitaryComposer::new().compose(&circuit).unwrap();
        prop_assert!(u.approx_eq(&Unitary::identity(num_qubits), 1e-9));
    }

    #[test]
    fn append_rejects_overhanging_placements(
        kind in arb_kind(), num_qubits in 1_u32..=4, extra in 0_u32..3,
    ) {
        let gate = Arc::new(Gate::with_angle(kind, 0.5));
        // First offset whose placement overhangs the register
        let offset = (num_qubits + 1).saturating_sub(gate.num_qubits()) + extra;
        let mut circuit = Circuit::new(num_qubits);
        prop_assert!(circuit.append(gate, offset).is_err());
        prop_assert_eq!(circuit.len(), 0);
    }

    #[test]
    fn reversed_export_matches_reversed_unitary(circuit in arb_circuit()) {
        prop_assume!(!circuit.is_empty());
        let composer = UnitaryComposer::new();
        let n = circuit.num_qubits();
        let triples = export_triples(&circuit, QubitOrder::Reversed);
        // Reading reversed offsets as native ones mirrors the register
        let mirrored = import_triples(n, &triples, QubitOrder::Native).unwrap();

        let native = composer.compose(&circuit).unwrap();
        let mirrored = composer.compose(&mirrored).unwrap();
        prop_assert!(native.reverse_qubit_order().approx_eq(&mirrored, 1e-9));
    }
}
