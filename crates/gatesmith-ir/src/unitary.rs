//! Dense unitary matrices over a qubit register.
//!
//! [`Unitary`] wraps a square `ndarray` matrix of dimension `2^n`. Basis
//! index bits follow the canonical qubit convention of this crate: qubit 0 is
//! the most significant bit, i.e. the left-most Kronecker factor.

use ndarray::{Array2, s};
use num_complex::Complex64;

use crate::error::{IrError, IrResult};

pub(crate) const ZERO: Complex64 = Complex64::new(0.0, 0.0);
pub(crate) const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A square complex matrix acting on `num_qubits()` qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct Unitary {
    matrix: Array2<Complex64>,
}

impl Unitary {
    /// The identity on `num_qubits` qubits.
    pub fn identity(num_qubits: u32) -> Self {
        Self::identity_dim(1usize << num_qubits)
    }

    pub(crate) fn identity_dim(dim: usize) -> Self {
        Self {
            matrix: Array2::eye(dim),
        }
    }

    /// Wrap a matrix, checking that it is square with a power-of-two dimension.
    ///
    /// Unitarity itself is not checked; use [`Unitary::is_unitary`].
    pub fn from_array(matrix: Array2<Complex64>) -> IrResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(IrError::NotSquare {
                rows,
                row: 0,
                len: cols,
            });
        }
        if !rows.is_power_of_two() {
            return Err(IrError::DimensionNotPowerOfTwo(rows));
        }
        Ok(Self { matrix })
    }

    /// Build a matrix from row-major rows.
    pub fn from_rows(rows: &[Vec<Complex64>]) -> IrResult<Self> {
        let dim = rows.len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != dim) {
            return Err(IrError::NotSquare {
                rows: dim,
                row,
                len: r.len(),
            });
        }
        let flat: Vec<Complex64> = rows.iter().flatten().copied().collect();
        let matrix = Array2::from_shape_vec((dim, dim), flat).map_err(|_| IrError::NotSquare {
            rows: dim,
            row: 0,
            len: 0,
        })?;
        Self::from_array(matrix)
    }

    /// Build from a fixed-size row-major array. Used for the closed-form gate matrices.
    pub(crate) fn from_fixed<const N: usize>(rows: [[Complex64; N]; N]) -> Self {
        let flat: Vec<Complex64> = rows.iter().flatten().copied().collect();
        let matrix = Array2::from_shape_vec((N, N), flat)
            .unwrap_or_else(|_| unreachable!("fixed-size rows always form an N x N matrix"));
        Self { matrix }
    }

    /// Matrix dimension (number of rows).
    #[inline]
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of qubits this operator acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.dim().trailing_zeros()
    }

    /// Borrow the underlying matrix.
    pub fn as_array(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Take the underlying matrix.
    pub fn into_array(self) -> Array2<Complex64> {
        self.matrix
    }

    /// Entry at (`row`, `col`).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[[row, col]]
    }

    /// Row-major copy of the entries.
    pub fn to_rows(&self) -> Vec<Vec<Complex64>> {
        self.matrix.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    /// Kronecker product `self ⊗ other`.
    pub fn kron(&self, other: &Self) -> Self {
        let p = other.dim();
        let n = self.dim() * p;
        let mut out = Array2::from_elem((n, n), ZERO);
        for ((i, j), &a) in self.matrix.indexed_iter() {
            // Identity padding is mostly zeros
            if a == ZERO {
                continue;
            }
            out.slice_mut(s![i * p..(i + 1) * p, j * p..(j + 1) * p])
                .assign(&other.matrix.mapv(|b| a * b));
        }
        Self { matrix: out }
    }

    /// Matrix product `self · other`.
    pub fn dot(&self, other: &Self) -> Self {
        debug_assert_eq!(self.dim(), other.dim());
        Self {
            matrix: self.matrix.dot(&other.matrix),
        }
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        Self {
            matrix: self.matrix.t().mapv(|x| x.conj()),
        }
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> Complex64 {
        self.matrix.diag().iter().sum()
    }

    /// `trace(self† · other)` without forming the product.
    ///
    /// # Panics
    ///
    /// If the operators differ in dimension.
    pub fn inner_trace(&self, other: &Self) -> Complex64 {
        assert_eq!(
            self.dim(),
            other.dim(),
            "inner trace of operators of different size"
        );
        self.matrix
            .iter()
            .zip(other.matrix.iter())
            .map(|(a, b)| a.conj() * b)
            .sum()
    }

    /// Multiply every entry by `factor` (e.g. a global phase).
    #[must_use]
    pub fn scaled(&self, factor: Complex64) -> Self {
        Self {
            matrix: self.matrix.mapv(|x| x * factor),
        }
    }

    /// Largest entry-wise distance between two matrices of equal size.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.matrix
            .iter()
            .zip(other.matrix.iter())
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max)
    }

    /// Entry-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        self.dim() == other.dim() && self.max_abs_diff(other) < tol
    }

    /// Check `U†U = I` within `tol` (max-abs norm).
    pub fn is_unitary(&self, tol: f64) -> bool {
        self.dagger()
            .dot(self)
            .approx_eq(&Self::identity_dim(self.dim()), tol)
    }

    /// Re-index the basis so that qubit `k` becomes qubit `n - 1 - k`.
    ///
    /// This is the conversion to (and from) the little-endian numbering used
    /// by external toolchains.
    #[must_use]
    pub fn reverse_qubit_order(&self) -> Self {
        let n = self.num_qubits();
        if n <= 1 {
            return self.clone();
        }
        let rev = |i: usize| i.reverse_bits() >> (usize::BITS - n);
        let dim = self.dim();
        let matrix = Array2::from_shape_fn((dim, dim), |(i, j)| self.matrix[[rev(i), rev(j)]]);
        Self { matrix }
    }
}

impl std::ops::Mul for &Unitary {
    type Output = Unitary;

    fn mul(self, rhs: Self) -> Unitary {
        self.dot(rhs)
    }
}
