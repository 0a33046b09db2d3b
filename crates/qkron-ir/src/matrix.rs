//! Gate catalog: canonical matrices for every [`StandardGate`].
//!
//! Every function here returns a freshly allocated matrix; callers are free
//! to mutate what they get back.

use ndarray::{Array2, array};
use num_complex::Complex64;

use crate::error::IrResult;
use crate::gate::StandardGate;

/// Dense complex matrix, row-major.
pub type Matrix = Array2<Complex64>;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Identity matrix of the given dimension.
pub fn identity(dim: usize) -> Matrix {
    Array2::eye(dim)
}

/// The 4x4 two-qubit SWAP matrix.
pub fn swap_matrix() -> Matrix {
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ZERO, ONE, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, ZERO, ONE],
    ]
}

/// Projector onto the computational basis state `|outcome⟩` of one qubit.
///
/// `outcome` 0 gives `diag(1, 0)`, anything else gives `diag(0, 1)`.
pub fn projector(outcome: u8) -> Matrix {
    if outcome == 0 {
        array![[ONE, ZERO], [ZERO, ZERO]]
    } else {
        array![[ZERO, ZERO], [ZERO, ONE]]
    }
}

impl StandardGate {
    /// The canonical unitary of this gate: 2x2, or 4x4 for SWAP.
    pub fn matrix(&self) -> Matrix {
        match *self {
            StandardGate::X => array![[ZERO, ONE], [ONE, ZERO]],
            StandardGate::Y => array![[ZERO, -I], [I, ZERO]],
            StandardGate::Z => array![[ONE, ZERO], [ZERO, -ONE]],
            StandardGate::H => {
                let s = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);
                array![[s, s], [s, -s]]
            }
            StandardGate::Rx(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
                array![[c, neg_i_s], [neg_i_s, c]]
            }
            StandardGate::Ry(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new((theta / 2.0).sin(), 0.0);
                array![[c, -s], [s, c]]
            }
            StandardGate::Rz(theta) => {
                let exp_neg = Complex64::from_polar(1.0, -theta / 2.0);
                let exp_pos = Complex64::from_polar(1.0, theta / 2.0);
                array![[exp_neg, ZERO], [ZERO, exp_pos]]
            }
            StandardGate::Swap => swap_matrix(),
        }
    }
}

/// Look up a gate by name and return its matrix.
pub fn matrix_for(name: &str, angle: Option<f64>) -> IrResult<Matrix> {
    Ok(StandardGate::from_name(name, angle)?.matrix())
}

/// Conjugate transpose.
pub fn dagger(m: &Matrix) -> Matrix {
    m.t().mapv(|z| z.conj())
}

/// Check `U† U ≈ I` entry-wise within `tolerance`.
pub fn is_unitary(m: &Matrix, tolerance: f64) -> bool {
    if !m.is_square() {
        return false;
    }
    let product = dagger(m).dot(m);
    approx_eq(&product, &identity(m.nrows()), tolerance)
}

/// Entry-wise comparison of two matrices.
pub fn approx_eq(a: &Matrix, b: &Matrix, tolerance: f64) -> bool {
    a.dim() == b.dim() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() <= tolerance)
}
