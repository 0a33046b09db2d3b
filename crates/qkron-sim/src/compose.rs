//! Per-operation full-register unitaries.

use ndarray::Array1;
use num_complex::Complex64;

use qkron_ir::matrix::{dagger, identity, swap_matrix};
use qkron_ir::{CustomGate, Matrix, Operation, QubitId, StandardGate};

use crate::control::controlled;
use crate::error::SimResult;
use crate::routing;
use crate::unitary::embed;

/// The unitary of one operation, kept in factored form.
///
/// `U = S† · G · S`, where `S` is the routing swap sequence and `G` the
/// embedded block operator. Applying the factors one by one to a vector is
/// exactly `U ψ` without ever forming the product.
#[derive(Debug, Clone)]
pub struct OperationUnitary {
    swaps: Vec<Matrix>,
    block: Matrix,
}

impl OperationUnitary {
    /// Build the factors for `op` on a `register_size`-qubit register.
    pub fn for_operation(op: &Operation, register_size: usize) -> SimResult<Self> {
        op.validate(register_size)?;

        let plan = routing::plan(register_size, op.target, &op.gate.operands)?;
        let local = match op.gate.kind {
            StandardGate::Swap => swap_matrix(),
            ref gate => controlled(gate, op.gate.operands.len())?,
        };
        let block = embed(&local, register_size, plan.target, &plan.operand_positions)?;

        Ok(Self {
            swaps: plan.unitaries(register_size)?,
            block,
        })
    }

    /// Number of routing swaps on each side of the block operator.
    pub fn swap_count(&self) -> usize {
        self.swaps.len()
    }

    /// Dimension of the full space.
    pub fn dim(&self) -> usize {
        self.block.nrows()
    }

    /// `U ψ`.
    pub fn apply(&self, psi: &Array1<Complex64>) -> Array1<Complex64> {
        let mut v = psi.clone();
        for swap in &self.swaps {
            v = swap.dot(&v);
        }
        v = self.block.dot(&v);
        for swap in self.swaps.iter().rev() {
            v = swap.dot(&v);
        }
        v
    }

    /// The composed `2^n x 2^n` matrix.
    pub fn matrix(&self) -> Matrix {
        let mut routing = identity(self.dim());
        for swap in &self.swaps {
            routing = swap.dot(&routing);
        }
        dagger(&routing).dot(&self.block).dot(&routing)
    }
}

/// Full-register unitary of a custom gate anchored at `anchor`: the product
/// of its block unitaries, first block applied first.
pub fn custom_gate_unitary(
    gate: &CustomGate,
    register_size: usize,
    anchor: QubitId,
) -> SimResult<Matrix> {
    let mut total = identity(1 << register_size);
    for op in gate.operations(anchor, register_size)? {
        let u = OperationUnitary::for_operation(&op, register_size)?.matrix();
        total = u.dot(&total);
    }
    Ok(total)
}
