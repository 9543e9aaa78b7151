//! Full-register unitaries of circuits.
//!
//! Each placed gate is embedded into the `2^n`-dimensional space by padding
//! it with identities:
//!
//! ```text
//! E = I(2^offset) ⊗ G ⊗ I(2^(n - offset - span))
//! ```
//!
//! and the circuit unitary is the product of the embeddings in reverse
//! insertion order, `U = E_k · … · E_2 · E_1`, so the first appended gate is
//! applied first to a state vector.
//!
//! Embeddings recur constantly during search (the same placed gate appears in
//! many candidates), so they are memoized in an [`ExpansionCache`] owned by
//! the composer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::circuit::{Circuit, PlacedGate};
use crate::error::{IrError, IrResult};
use crate::gate::GateKey;
use crate::unitary::Unitary;

/// Cache key of an embedded gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpansionKey {
    /// Gate kind and angle.
    pub gate: GateKey,
    /// First qubit of the placement.
    pub offset: u32,
    /// Size of the register the gate is embedded into.
    pub num_qubits: u32,
}

/// Hit/miss counters of an [`ExpansionCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that computed a new embedding.
    pub misses: u64,
    /// Number of stored embeddings.
    pub entries: usize,
}

/// Memo of embedded gate unitaries. Entries are never evicted.
///
/// Safe to share between threads: concurrent misses on the same key may both
/// compute the embedding, and the second insert overwrites the first with an
/// equal value.
#[derive(Debug, Default)]
pub struct ExpansionCache {
    entries: RwLock<FxHashMap<ExpansionKey, Arc<Unitary>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ExpansionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key`, computing and storing it with `build` on a miss.
    pub fn get_or_insert_with(
        &self,
        key: ExpansionKey,
        build: impl FnOnce() -> Unitary,
    ) -> Arc<Unitary> {
        let cached = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(hit) = cached {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return hit;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = Arc::new(build());
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&value));
        value
    }

    /// Number of stored embeddings.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

/// Composes circuits into full-register unitaries.
#[derive(Debug, Default)]
pub struct UnitaryComposer {
    cache: ExpansionCache,
}

impl UnitaryComposer {
    /// Create a composer with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedding cache.
    pub fn cache(&self) -> &ExpansionCache {
        &self.cache
    }

    /// Embed `placed` into a register of `num_qubits` qubits.
    ///
    /// Fails with [`IrError::InvalidPlacement`] if the gate does not fit.
    pub fn embed(&self, placed: &PlacedGate, num_qubits: u32) -> IrResult<Arc<Unitary>> {
        if !placed.fits(num_qubits) {
            return Err(IrError::InvalidPlacement {
                gate: placed.gate.name(),
                offset: placed.offset,
                span: placed.gate.num_qubits(),
                num_qubits,
            });
        }
        let key = ExpansionKey {
            gate: placed.gate.key(),
            offset: placed.offset,
            num_qubits,
        };
        Ok(self
            .cache
            .get_or_insert_with(key, || expand(placed, num_qubits)))
    }

    /// Apply one more gate to an already composed operator: `E · prefix`.
    pub fn apply(&self, prefix: &Unitary, placed: &PlacedGate) -> IrResult<Unitary> {
        let num_qubits = prefix.num_qubits();
        let embedded = self.embed(placed, num_qubits)?;
        Ok(embedded.dot(prefix))
    }

    /// The unitary of the whole circuit.
    ///
    /// Fails with [`IrError::EmptyCircuit`] if nothing has been appended.
    pub fn compose(&self, circuit: &Circuit) -> IrResult<Unitary> {
        let n = circuit.num_qubits();
        let (first, rest) = circuit
            .operations()
            .split_first()
            .ok_or(IrError::EmptyCircuit)?;

        let mut unitary = Unitary::clone(&*self.embed(first, n)?);
        for placed in rest {
            unitary = self.embed(placed, n)?.dot(&unitary);
        }
        Ok(unitary)
    }
}

fn expand(placed: &PlacedGate, num_qubits: u32) -> Unitary {
    let span = placed.gate.num_qubits();
    let below = num_qubits - placed.offset - span;
    trace!(
        gate = placed.gate.name(),
        theta = placed.gate.parameter(),
        offset = placed.offset,
        num_qubits,
        "expanding placed gate"
    );

    let mut unitary = placed.gate.unitary().clone();
    if placed.offset > 0 {
        unitary = Unitary::identity(placed.offset).kron(&unitary);
    }
    if below > 0 {
        unitary = unitary.kron(&Unitary::identity(below));
    }
    unitary
}
