//! Hardware rotation gates and the gate catalog.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::sync::{Arc, OnceLock};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::unitary::{Unitary, ZERO};

/// The rotation gates a target device supports natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateKind {
    /// Rotation around the X axis.
    Rx,
    /// Rotation around the Y axis.
    Ry,
    /// Rotation around the Z axis.
    Rz,
    /// Two-qubit XX rotation (Mølmer–Sørensen interaction).
    Rxx,
}

impl GateKind {
    /// Every supported kind, in catalog order.
    pub const ALL: [GateKind; 4] = [GateKind::Rx, GateKind::Ry, GateKind::Rz, GateKind::Rxx];

    /// Get the name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Rx => "rx",
            GateKind::Ry => "ry",
            GateKind::Rz => "rz",
            GateKind::Rxx => "rxx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        match self {
            GateKind::Rx | GateKind::Ry | GateKind::Rz => 1,
            GateKind::Rxx => 2,
        }
    }

    /// Number of real parameters the gate takes.
    #[inline]
    pub fn num_params(self) -> usize {
        1
    }

    /// Closed-form matrix of this rotation at angle `theta`.
    pub fn matrix(self, theta: f64) -> Unitary {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let re = |x: f64| Complex64::new(x, 0.0);
        let is = Complex64::new(0.0, -s);
        match self {
            GateKind::Rx => Unitary::from_fixed([[re(c), is], [is, re(c)]]),
            GateKind::Ry => Unitary::from_fixed([[re(c), re(-s)], [re(s), re(c)]]),
            GateKind::Rz => Unitary::from_fixed([
                [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
                [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
            ]),
            GateKind::Rxx => Unitary::from_fixed([
                [re(c), ZERO, ZERO, is],
                [ZERO, re(c), is, ZERO],
                [ZERO, is, re(c), ZERO],
                [is, ZERO, ZERO, re(c)],
            ]),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rotation gate with a fixed angle.
///
/// The matrix is computed on first use and memoized on the instance, since
/// it is requested for every embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gate {
    kind: GateKind,
    theta: f64,
    #[serde(skip)]
    unitary: OnceLock<Unitary>,
}

impl Gate {
    /// Create a gate from a parameter list.
    ///
    /// Fails with [`IrError::InvalidParameterCount`] unless exactly one
    /// parameter is supplied.
    pub fn new(kind: GateKind, params: &[f64]) -> IrResult<Self> {
        match params {
            [theta] => Ok(Self::with_angle(kind, *theta)),
            _ => Err(IrError::InvalidParameterCount {
                kind,
                expected: kind.num_params(),
                got: params.len(),
            }),
        }
    }

    /// Create a gate with a single angle.
    pub fn with_angle(kind: GateKind, theta: f64) -> Self {
        Self {
            kind,
            theta,
            unitary: OnceLock::new(),
        }
    }

    /// RX(θ).
    pub fn rx(theta: f64) -> Self {
        Self::with_angle(GateKind::Rx, theta)
    }

    /// RY(θ).
    pub fn ry(theta: f64) -> Self {
        Self::with_angle(GateKind::Ry, theta)
    }

    /// RZ(θ).
    pub fn rz(theta: f64) -> Self {
        Self::with_angle(GateKind::Rz, theta)
    }

    /// RXX(θ).
    pub fn rxx(theta: f64) -> Self {
        Self::with_angle(GateKind::Rxx, theta)
    }

    /// The gate kind.
    #[inline]
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Rotation angle.
    #[inline]
    pub fn parameter(&self) -> f64 {
        self.theta
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// The gate's local unitary (2x2 or 4x4).
    pub fn unitary(&self) -> &Unitary {
        self.unitary.get_or_init(|| self.kind.matrix(self.theta))
    }

    /// The same rotation with the angle negated.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self::with_angle(self.kind, -self.theta)
    }

    /// Value identity of the gate, with the angle compared bitwise.
    #[inline]
    pub fn key(&self) -> GateKey {
        GateKey {
            kind: self.kind,
            theta_bits: self.theta.to_bits(),
        }
    }
}

impl PartialEq for Gate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:.6})", self.kind, self.theta)
    }
}

/// Hashable identity of a [`Gate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GateKey {
    /// The gate kind.
    pub kind: GateKind,
    /// `f64::to_bits` of the angle.
    pub theta_bits: u64,
}

/// An ordered, immutable set of gates available to the search.
///
/// The order is significant: it is the enumeration order of every search
/// and therefore the tie-break order between equally good candidates.
#[derive(Debug, Clone, Default)]
pub struct GateCatalog {
    gates: Vec<Arc<Gate>>,
}

impl GateCatalog {
    /// Create a catalog from gates, keeping their order.
    pub fn from_gates(gates: impl IntoIterator<Item = Gate>) -> Self {
        Self {
            gates: gates.into_iter().map(Arc::new).collect(),
        }
    }

    /// The ±π/2 rotation set of a trapped-ion style device:
    /// RXX(π/2), RX(±π/2), RY(±π/2), RZ(±π/2).
    pub fn hardware_native() -> Self {
        Self::from_gates([
            Gate::rxx(FRAC_PI_2),
            Gate::rx(FRAC_PI_2),
            Gate::rx(-FRAC_PI_2),
            Gate::ry(FRAC_PI_2),
            Gate::ry(-FRAC_PI_2),
            Gate::rz(FRAC_PI_2),
            Gate::rz(-FRAC_PI_2),
        ])
    }

    /// Keep only the gates whose kind is in `kinds`.
    #[must_use]
    pub fn restricted_to(&self, kinds: &[GateKind]) -> Self {
        self.filtered(|g| kinds.contains(&g.kind()))
    }

    /// Keep only the gates accepted by `keep`.
    #[must_use]
    pub fn filtered(&self, mut keep: impl FnMut(&Gate) -> bool) -> Self {
        Self {
            gates: self.gates.iter().filter(|g| keep(g)).cloned().collect(),
        }
    }

    /// Number of gates.
    #[inline]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the catalog has no gates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Iterate the gates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Gate>> {
        self.gates.iter()
    }

    /// Get a gate by catalog index.
    pub fn get(&self, index: usize) -> Option<&Arc<Gate>> {
        self.gates.get(index)
    }

    /// Widest span of any gate in the catalog.
    pub fn max_span(&self) -> u32 {
        self.gates.iter().map(|g| g.num_qubits()).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a GateCatalog {
    type Item = &'a Arc<Gate>;
    type IntoIter = std::slice::Iter<'a, Arc<Gate>>;

    fn into_iter(self) -> Self::IntoIter {
        self.gates.iter()
    }
}
