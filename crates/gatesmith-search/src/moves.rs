//! Single-step moves and incremental composition of move sequences.
//!
//! A move is one valid placement from `catalog × qubit positions`. Sequences
//! of moves are enumerated in lexicographic order by a mixed-radix index, the
//! first move being the most significant digit.

use gatesmith_ir::{Circuit, GateCatalog, PlacedGate, Unitary, UnitaryComposer};

use crate::error::{SearchError, SearchResult};

/// The valid placements of a catalog on a register, in enumeration order.
///
/// Order is catalog-major: every position of the first gate, then every
/// position of the second, and so on.
#[derive(Debug, Clone)]
pub struct MoveSet {
    num_qubits: u32,
    moves: Vec<PlacedGate>,
}

impl MoveSet {
    /// Enumerate the placements of `catalog` that fit `num_qubits` qubits.
    ///
    /// Fails with [`SearchError::NoMoves`] if no gate fits.
    pub fn new(catalog: &GateCatalog, num_qubits: u32) -> SearchResult<Self> {
        let moves: Vec<PlacedGate> = catalog
            .iter()
            .flat_map(|gate| (0..num_qubits).map(move |q| PlacedGate::new(gate.clone(), q)))
            .filter(|placed| placed.fits(num_qubits))
            .collect();
        if moves.is_empty() {
            return Err(SearchError::NoMoves(num_qubits));
        }
        Ok(Self { num_qubits, moves })
    }

    /// Register size the moves were generated for.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Always false; construction rejects empty move sets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Get a move by index.
    ///
    /// # Panics
    ///
    /// If `index >= self.len()`. Indices produced by [`decode`](Self::decode)
    /// are always in range.
    #[inline]
    pub fn get(&self, index: usize) -> &PlacedGate {
        &self.moves[index]
    }

    /// Iterate the moves in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedGate> {
        self.moves.iter()
    }

    /// Number of move sequences of length `depth` (`len^depth`).
    pub fn sequence_count(&self, depth: usize) -> SearchResult<u64> {
        let too_large = || SearchError::SearchSpaceTooLarge {
            moves: self.moves.len(),
            depth,
        };
        let exp = u32::try_from(depth).map_err(|_| too_large())?;
        (self.moves.len() as u64)
            .checked_pow(exp)
            .ok_or_else(too_large)
    }

    /// Decode a sequence index into move indices, most significant first.
    ///
    /// `digits.len()` is the sequence length.
    pub fn decode(&self, mut index: u64, digits: &mut [usize]) {
        let radix = self.moves.len() as u64;
        for digit in digits.iter_mut().rev() {
            *digit = (index % radix) as usize;
            index /= radix;
        }
    }

    /// Build the circuit for a sequence of move indices.
    ///
    /// # Panics
    ///
    /// If any index is out of range, as [`get`](Self::get).
    pub fn circuit(&self, digits: &[usize]) -> SearchResult<Circuit> {
        let mut circuit = Circuit::with_capacity(self.num_qubits, digits.len());
        for &m in digits {
            circuit.push(self.moves[m].clone())?;
        }
        Ok(circuit)
    }
}

/// Check that `target` acts on `num_qubits` qubits and `epsilon` is usable.
pub(crate) fn check_problem(target: &Unitary, num_qubits: u32, epsilon: f64) -> SearchResult<()> {
    let expected = 1_usize.checked_shl(num_qubits).unwrap_or(0);
    if target.dim() != expected {
        return Err(SearchError::TargetDimension {
            num_qubits,
            expected,
            got: target.dim(),
        });
    }
    if !(epsilon.is_finite() && epsilon > 0.0) {
        return Err(SearchError::InvalidEpsilon(epsilon));
    }
    Ok(())
}

/// A circuit under construction together with its composed prefix products.
///
/// `products[k]` is the unitary of the first `k + 1` placements. Undoing is
/// truncation of both vectors, so a search can try an extension, score it and
/// retract it without copying or recomposing the shared prefix.
#[derive(Debug)]
pub struct CompositionStack<'c> {
    composer: &'c UnitaryComposer,
    identity: Unitary,
    circuit: Circuit,
    digits: Vec<usize>,
    products: Vec<Unitary>,
}

impl<'c> CompositionStack<'c> {
    /// An empty stack over `num_qubits` qubits.
    pub fn new(composer: &'c UnitaryComposer, num_qubits: u32) -> Self {
        Self {
            composer,
            identity: Unitary::identity(num_qubits),
            circuit: Circuit::new(num_qubits),
            digits: vec![],
            products: vec![],
        }
    }

    /// Number of stacked placements.
    #[inline]
    pub fn depth(&self) -> usize {
        self.digits.len()
    }

    /// Move indices of the stacked placements.
    pub fn digits(&self) -> &[usize] {
        &self.digits
    }

    /// The circuit built so far.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Unitary of the stacked circuit; the identity when empty.
    pub fn unitary(&self) -> &Unitary {
        self.products.last().unwrap_or(&self.identity)
    }

    /// Append move `m` and return the new unitary.
    pub fn push(&mut self, moves: &MoveSet, m: usize) -> SearchResult<&Unitary> {
        let placed = moves.get(m);
        let next = self.composer.apply(self.unitary(), placed)?;
        self.circuit.push(placed.clone())?;
        self.digits.push(m);
        self.products.push(next);
        Ok(self.unitary())
    }

    /// Keep only the first `len` placements.
    pub fn truncate(&mut self, len: usize) {
        self.circuit.truncate(len);
        self.digits.truncate(len);
        self.products.truncate(len);
    }

    /// Replace the stack with the sequence `digits`, reusing the common prefix.
    pub fn seek(&mut self, moves: &MoveSet, digits: &[usize]) -> SearchResult<&Unitary> {
        let common = self
            .digits
            .iter()
            .zip(digits)
            .take_while(|(a, b)| a == b)
            .count();
        self.truncate(common);
        for &m in &digits[common..] {
            self.push(moves, m)?;
        }
        Ok(self.unitary())
    }
}
