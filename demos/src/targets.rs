//! Standard two-qubit targets.
//!
//! All matrices use the native convention: qubit 0 is the most significant
//! bit of the basis index, so `cnot` is controlled by qubit 0.

use std::f64::consts::FRAC_1_SQRT_2;

use anyhow::{Result, bail};
use gatesmith_ir::{IrResult, Unitary};
use num_complex::Complex64;

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &["identity", "cnot", "phased_cnot", "signed_cnot", "swap"];

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

fn from_rows(rows: [[Complex64; 4]; 4]) -> IrResult<Unitary> {
    let rows: Vec<Vec<Complex64>> = rows.iter().map(|r| r.to_vec()).collect();
    Unitary::from_rows(&rows)
}

/// Controlled-NOT, control qubit 0.
pub fn cnot() -> IrResult<Unitary> {
    let (o, l) = (c(0.0, 0.0), c(1.0, 0.0));
    from_rows([[l, o, o, o], [o, l, o, o], [o, o, o, l], [o, o, l, o]])
}

/// CNOT times the global phase `e^{iπ/4}`. At distance 0 from [`cnot`].
pub fn phased_cnot() -> IrResult<Unitary> {
    Ok(cnot()?.scaled(c(FRAC_1_SQRT_2, FRAC_1_SQRT_2)))
}

/// CNOT followed by `Z` on the control, up to a global phase.
pub fn signed_cnot() -> IrResult<Unitary> {
    let o = c(0.0, 0.0);
    let w = c(FRAC_1_SQRT_2, FRAC_1_SQRT_2);
    from_rows([[-w, o, o, o], [o, -w, o, o], [o, o, o, w], [o, o, w, o]])
}

/// Qubit exchange.
pub fn swap() -> IrResult<Unitary> {
    let (o, l) = (c(0.0, 0.0), c(1.0, 0.0));
    from_rows([[l, o, o, o], [o, o, l, o], [o, l, o, o], [o, o, o, l]])
}

/// Look a target up by name.
pub fn by_name(name: &str) -> Result<Unitary> {
    let target = match name {
        "identity" => Unitary::identity(2),
        "cnot" => cnot()?,
        "phased_cnot" => phased_cnot()?,
        "signed_cnot" => signed_cnot()?,
        "swap" => swap()?,
        _ => bail!("unknown target '{name}', expected one of {NAMES:?}"),
    };
    Ok(target)
}
