//! Trace-fidelity distance between unitaries.

use crate::unitary::Unitary;

/// Distance between two unitaries of equal size, ignoring global phase.
///
/// ```text
/// d(A, B) = sqrt(1 - min(|tr(A† B)| / dim, 1)^2)
/// ```
///
/// Returns 0 when `B = e^{iφ} A` and approaches 1 as the operators become
/// maximally distinguishable. The fidelity ratio is clamped to `[0, 1]` so
/// rounding overshoot never produces a NaN.
///
/// # Panics
///
/// If `a` and `b` differ in dimension.
pub fn distance(a: &Unitary, b: &Unitary) -> f64 {
    let dim = a.dim() as f64;
    let fidelity = (a.inner_trace(b).norm() / dim).clamp(0.0, 1.0);
    (1.0 - fidelity * fidelity).sqrt()
}
