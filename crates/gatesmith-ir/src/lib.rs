//! gatesmith circuit and unitary core
//!
//! This crate provides the building blocks every gatesmith search runs on:
//! a catalog of hardware rotation gates, append-only circuits that place
//! those gates on adjacent qubits, the composer that turns a circuit into a
//! full-register unitary, and the distance used to score candidates.
//!
//! # Core Components
//!
//! - **Gates**: [`GateKind`] (RX, RY, RZ, RXX) and [`Gate`], a rotation with a
//!   fixed angle and a memoized matrix
//! - **Catalog**: [`GateCatalog`], the ordered set of gates a search may use
//! - **Circuit**: [`Circuit`] of [`PlacedGate`]s over a fixed qubit count
//! - **Composition**: [`UnitaryComposer`] with its [`ExpansionCache`]
//! - **Distance**: [`distance`], trace fidelity up to global phase
//! - **Export**: [`GateTriple`] lists in either [`QubitOrder`]
//!
//! # Qubit convention
//!
//! Qubit 0 is the left-most Kronecker factor, i.e. the most significant bit
//! of a basis index. The little-endian convention of other toolchains is only
//! reachable through [`export_triples`], [`import_triples`] and
//! [`Unitary::reverse_qubit_order`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::f64::consts::PI;
//! use gatesmith_ir::{Circuit, Gate, UnitaryComposer, Unitary, distance};
//!
//! let mut circuit = Circuit::new(2);
//! circuit.append(Arc::new(Gate::rx(PI / 2.0)), 1).unwrap();
//! circuit.append(Arc::new(Gate::rx(-PI / 2.0)), 1).unwrap();
//!
//! let composer = UnitaryComposer::new();
//! let unitary = composer.compose(&circuit).unwrap();
//! assert!(distance(&unitary, &Unitary::identity(2)) < 1e-6);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Matrix |
//! |------|--------|--------|
//! | `rx` | 1 | `[[c, -is], [-is, c]]` |
//! | `ry` | 1 | `[[c, -s], [s, c]]` |
//! | `rz` | 1 | `diag(e^{-iθ/2}, e^{iθ/2})` |
//! | `rxx` | 2 | `c·I - is·X⊗X` |
//!
//! with `c = cos(θ/2)`, `s = sin(θ/2)`.

pub mod circuit;
pub mod compose;
pub mod distance;
pub mod error;
pub mod export;
pub mod gate;
pub mod unitary;

pub use circuit::{Circuit, PlacedGate};
pub use compose::{CacheStats, ExpansionCache, ExpansionKey, UnitaryComposer};
pub use distance::distance;
pub use error::{IrError, IrResult};
pub use export::{GateTriple, QubitOrder, export_triples, import_triples, triples_to_json};
pub use gate::{Gate, GateCatalog, GateKey, GateKind};
pub use unitary::Unitary;
