//! Multi-controlled gate construction.

use ndarray::s;

use qkron_ir::matrix::identity;
use qkron_ir::{IrError, Matrix, StandardGate};

use crate::error::SimResult;

/// Build the `2^(control_count+1)`-square matrix of `gate` controlled by
/// `control_count` qubits.
///
/// The result is the identity except for its bottom-right 2x2 block, which
/// holds the gate: it acts only when every control is |1⟩. Controls occupy
/// the most significant positions and the target the least significant one.
/// With zero controls this is just the gate matrix.
pub fn controlled(gate: &StandardGate, control_count: usize) -> SimResult<Matrix> {
    if gate.num_qubits() != 1 {
        return Err(IrError::InvalidGate(format!(
            "{} cannot be used as a controlled-gate base",
            gate.name()
        ))
        .into());
    }

    let dim = 1usize << (control_count + 1);
    let mut matrix = identity(dim);
    matrix
        .slice_mut(s![dim - 2.., dim - 2..])
        .assign(&gate.matrix());
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use num_complex::Complex64;
    use qkron_ir::matrix::{approx_eq, is_unitary};

    const EPS: f64 = 1e-12;

    #[test]
    fn test_zero_controls_is_the_gate() {
        let h = controlled(&StandardGate::H, 0).unwrap();
        assert!(approx_eq(&h, &StandardGate::H.matrix(), EPS));
    }

    #[test]
    fn test_cnot() {
        let cx = controlled(&StandardGate::X, 1).unwrap();
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let expected = ndarray::array![
            [one, zero, zero, zero],
            [zero, one, zero, zero],
            [zero, zero, zero, one],
            [zero, zero, one, zero],
        ];
        assert!(approx_eq(&cx, &expected, EPS));
    }

    #[test]
    fn test_toffoli_shape() {
        let ccx = controlled(&StandardGate::X, 2).unwrap();
        assert_eq!(ccx.dim(), (8, 8));
        assert!(is_unitary(&ccx, EPS));
        // |110⟩ ↔ |111⟩, everything else fixed
        assert_eq!(ccx[[6, 7]], Complex64::new(1.0, 0.0));
        assert_eq!(ccx[[7, 6]], Complex64::new(1.0, 0.0));
        assert_eq!(ccx[[5, 5]], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn test_controlled_rotation_is_unitary() {
        for k in 0..4 {
            let m = controlled(&StandardGate::Ry(0.4), k).unwrap();
            assert!(is_unitary(&m, EPS));
        }
    }

    #[test]
    fn test_swap_is_not_a_control_base() {
        assert!(matches!(
            controlled(&StandardGate::Swap, 1),
            Err(SimError::Ir(IrError::InvalidGate(_)))
        ));
    }
}
