//! Full-register operators built from local matrices.

use ndarray::{Array2, linalg};
use num_complex::Complex64;

use qkron_ir::matrix::identity;
use qkron_ir::{IrError, Matrix, QubitId};

use crate::error::{SimError, SimResult};

/// Kronecker product `a ⊗ b`.
pub fn kron(a: &Matrix, b: &Matrix) -> Matrix {
    linalg::kron(a, b)
}

/// Embed `local` into a `register_size`-qubit space.
///
/// `local` acts on the contiguous block `excluded ++ [target]`: the excluded
/// positions must be exactly the `k` positions directly above `target`, and
/// `local` must be `2^(k+1)`-square. Every other position gets an identity.
///
/// Positions are folded from the highest index down, prepending each factor,
/// so qubit 0 ends up as the most significant bit.
pub fn embed(
    local: &Matrix,
    register_size: usize,
    target: QubitId,
    excluded: &[QubitId],
) -> SimResult<Matrix> {
    if target.index() >= register_size {
        return Err(IrError::InvalidIndex {
            qubit: target,
            num_qubits: register_size,
            gate_name: None,
        }
        .into());
    }

    let block = excluded.len() + 1;
    let expected_dim = 1usize << block;
    if !local.is_square() || local.nrows() != expected_dim {
        return Err(SimError::DimensionMismatch {
            expected: expected_dim,
            got: local.nrows(),
        });
    }
    check_block(target, excluded)?;

    let id2 = identity(2);
    let mut unitary: Matrix = Array2::from_elem((1, 1), Complex64::new(1.0, 0.0));
    for position in (0..register_size).rev() {
        let qubit = QubitId::from(position);
        if excluded.contains(&qubit) {
            continue;
        }
        unitary = if qubit == target {
            kron(local, &unitary)
        } else {
            kron(&id2, &unitary)
        };
    }
    Ok(unitary)
}

/// Excluded positions must sit immediately above the target, no gaps.
fn check_block(target: QubitId, excluded: &[QubitId]) -> SimResult<()> {
    let k = excluded.len();
    if k > target.index() {
        return Err(SimError::InvalidState(format!(
            "{k} excluded qubits do not fit above target {target}"
        )));
    }
    let start = target.index() - k;
    let mut sorted: Vec<usize> = excluded.iter().map(|q| q.index()).collect();
    sorted.sort_unstable();
    if sorted.iter().copied().ne(start..target.index()) {
        return Err(SimError::InvalidState(format!(
            "excluded qubits {excluded:?} are not the block directly above {target}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qkron_ir::StandardGate;
    use qkron_ir::matrix::{approx_eq, is_unitary, swap_matrix};

    const EPS: f64 = 1e-12;

    #[test]
    fn test_single_qubit_register_is_the_gate() {
        let h = StandardGate::H.matrix();
        let u = embed(&h, 1, QubitId(0), &[]).unwrap();
        assert!(approx_eq(&u, &h, EPS));
    }

    #[test]
    fn test_qubit_zero_is_most_significant() {
        let x = StandardGate::X.matrix();
        let u = embed(&x, 2, QubitId(0), &[]).unwrap();
        assert!(approx_eq(&u, &kron(&x, &identity(2)), EPS));

        let u = embed(&x, 2, QubitId(1), &[]).unwrap();
        assert!(approx_eq(&u, &kron(&identity(2), &x), EPS));
    }

    #[test]
    fn test_dimension_and_unitarity() {
        let y = StandardGate::Y.matrix();
        for target in 0..4 {
            let u = embed(&y, 4, QubitId(target), &[]).unwrap();
            assert_eq!(u.dim(), (16, 16));
            assert!(is_unitary(&u, EPS));
        }
    }

    #[test]
    fn test_block_with_excluded() {
        let u = embed(&swap_matrix(), 3, QubitId(2), &[QubitId(1)]).unwrap();
        let expected = kron(&identity(2), &swap_matrix());
        assert!(approx_eq(&u, &expected, EPS));
    }

    #[test]
    fn test_target_out_of_range() {
        let x = StandardGate::X.matrix();
        assert!(matches!(
            embed(&x, 2, QubitId(2), &[]),
            Err(SimError::Ir(IrError::InvalidIndex { .. }))
        ));
    }

    #[test]
    fn test_wrong_local_dimension() {
        assert!(matches!(
            embed(&swap_matrix(), 2, QubitId(1), &[]),
            Err(SimError::DimensionMismatch { expected: 2, got: 4 })
        ));
    }

    #[test]
    fn test_excluded_must_be_adjacent_block() {
        assert!(matches!(
            embed(&swap_matrix(), 3, QubitId(2), &[QubitId(0)]),
            Err(SimError::InvalidState(_))
        ));
        assert!(matches!(
            embed(&swap_matrix(), 3, QubitId(0), &[QubitId(1)]),
            Err(SimError::InvalidState(_))
        ));
    }
}
