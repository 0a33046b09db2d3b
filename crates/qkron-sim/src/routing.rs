//! Adjacent-swap routing.
//!
//! Controlled gates are embedded as one contiguous block `[controls…, target]`.
//! When the qubits of an operation are scattered over the register, the
//! router computes a sequence of nearest-neighbour swaps that gathers them
//! into such a block. Applying the swaps, then the block operator, then the
//! same swaps in reverse order leaves every qubit where it started.

use rustc_hash::FxHashSet;

use qkron_ir::matrix::swap_matrix;
use qkron_ir::{IrError, Matrix, QubitId};

use crate::error::SimResult;
use crate::unitary::embed;

/// Exchange of the qubits at positions `upper` and `upper + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacentSwap {
    /// The lower index of the two positions.
    pub upper: usize,
}

impl AdjacentSwap {
    /// Full-register unitary of this swap.
    pub fn unitary(&self, register_size: usize) -> SimResult<Matrix> {
        embed(
            &swap_matrix(),
            register_size,
            QubitId::from(self.upper + 1),
            &[QubitId::from(self.upper)],
        )
    }
}

/// Result of routing one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPlan {
    /// Swaps in application order.
    pub swaps: Vec<AdjacentSwap>,
    /// Positions of the operands once routed, directly above `target`.
    pub operand_positions: Vec<QubitId>,
    /// Position of the target once routed.
    pub target: QubitId,
}

impl RoutingPlan {
    /// Check whether no swap is needed.
    pub fn is_trivial(&self) -> bool {
        self.swaps.is_empty()
    }

    /// The swap unitaries, in application order.
    pub fn unitaries(&self, register_size: usize) -> SimResult<Vec<Matrix>> {
        self.swaps
            .iter()
            .map(|swap| swap.unitary(register_size))
            .collect()
    }
}

/// Plan the swaps that gather `operands` directly above `target`.
///
/// The block keeps the target in place when there is room above it for all
/// operands; otherwise it starts at position 0. Operands keep their relative
/// order inside the block, and qubits outside the block keep theirs.
pub fn plan(register_size: usize, target: QubitId, operands: &[QubitId]) -> SimResult<RoutingPlan> {
    validate(register_size, target, operands)?;

    let k = operands.len();
    let start = target.index().saturating_sub(k);

    let mut sorted_operands = operands.to_vec();
    sorted_operands.sort_unstable();

    // desired[q] = position logical qubit q must end up at
    let mut desired = vec![0usize; register_size];
    let mut in_block = vec![false; register_size];
    for (offset, q) in sorted_operands.iter().enumerate() {
        desired[q.index()] = start + offset;
        in_block[q.index()] = true;
    }
    desired[target.index()] = start + k;
    in_block[target.index()] = true;

    let mut free = (0..register_size).filter(|p| !(start..=start + k).contains(p));
    for q in 0..register_size {
        if !in_block[q] {
            // Both sides have register_size - k - 1 entries.
            desired[q] = free.next().unwrap_or(q);
        }
    }

    // Bubble the layout into place; every exchange is one adjacent swap.
    let mut layout: Vec<usize> = (0..register_size).collect();
    let mut swaps = vec![];
    loop {
        let mut changed = false;
        for p in 0..register_size.saturating_sub(1) {
            if desired[layout[p]] > desired[layout[p + 1]] {
                layout.swap(p, p + 1);
                swaps.push(AdjacentSwap { upper: p });
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    Ok(RoutingPlan {
        swaps,
        operand_positions: (start..start + k).map(QubitId::from).collect(),
        target: QubitId::from(start + k),
    })
}

fn validate(register_size: usize, target: QubitId, operands: &[QubitId]) -> SimResult<()> {
    for &qubit in std::iter::once(&target).chain(operands) {
        if qubit.index() >= register_size {
            return Err(IrError::InvalidIndex {
                qubit,
                num_qubits: register_size,
                gate_name: None,
            }
            .into());
        }
    }
    let mut seen = FxHashSet::default();
    for &qubit in operands {
        if qubit == target {
            return Err(IrError::ControlIsTarget {
                qubit,
                gate_name: None,
            }
            .into());
        }
        if !seen.insert(qubit) {
            return Err(IrError::DuplicateQubit {
                qubit,
                gate_name: None,
            }
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use qkron_ir::matrix::is_unitary;

    fn apply_swaps(register_size: usize, swaps: &[AdjacentSwap]) -> Vec<usize> {
        let mut layout: Vec<usize> = (0..register_size).collect();
        for s in swaps {
            layout.swap(s.upper, s.upper + 1);
        }
        layout
    }

    #[test]
    fn test_no_controls_is_trivial() {
        let plan = plan(4, QubitId(2), &[]).unwrap();
        assert!(plan.is_trivial());
        assert_eq!(plan.target, QubitId(2));
        assert!(plan.operand_positions.is_empty());
    }

    #[test]
    fn test_adjacent_control_above_is_trivial() {
        let plan = plan(2, QubitId(1), &[QubitId(0)]).unwrap();
        assert!(plan.is_trivial());
        assert_eq!(plan.operand_positions, vec![QubitId(0)]);
        assert_eq!(plan.target, QubitId(1));
    }

    #[test]
    fn test_control_below_target() {
        // control 2, target 0 on three qubits: block must start at 0
        let plan = plan(3, QubitId(0), &[QubitId(2)]).unwrap();
        assert_eq!(plan.swaps, vec![AdjacentSwap { upper: 1 }, AdjacentSwap { upper: 0 }]);
        let layout = apply_swaps(3, &plan.swaps);
        assert_eq!(layout[plan.operand_positions[0].index()], 2);
        assert_eq!(layout[plan.target.index()], 0);
    }

    #[test]
    fn test_distant_control_walks_to_target() {
        let plan = plan(5, QubitId(4), &[QubitId(0)]).unwrap();
        assert_eq!(plan.swaps.len(), 3);
        let layout = apply_swaps(5, &plan.swaps);
        assert_eq!(layout[3], 0);
        assert_eq!(layout[4], 4);
    }

    #[test]
    fn test_multiple_controls_form_block() {
        let plan = plan(5, QubitId(2), &[QubitId(4), QubitId(0)]).unwrap();
        let layout = apply_swaps(5, &plan.swaps);
        assert_eq!(plan.operand_positions, vec![QubitId(0), QubitId(1)]);
        assert_eq!(layout[0], 0);
        assert_eq!(layout[1], 4);
        assert_eq!(layout[2], 2);
    }

    #[test]
    fn test_swap_unitaries_are_unitary() {
        let plan = plan(4, QubitId(0), &[QubitId(3)]).unwrap();
        for u in plan.unitaries(4).unwrap() {
            assert_eq!(u.dim(), (16, 16));
            assert!(is_unitary(&u, 1e-12));
        }
    }

    #[test]
    fn test_rejects_bad_indexes() {
        assert!(matches!(
            plan(3, QubitId(3), &[]),
            Err(SimError::Ir(IrError::InvalidIndex { .. }))
        ));
        assert!(matches!(
            plan(3, QubitId(0), &[QubitId(7)]),
            Err(SimError::Ir(IrError::InvalidIndex { .. }))
        ));
        assert!(matches!(
            plan(3, QubitId(1), &[QubitId(1)]),
            Err(SimError::Ir(IrError::ControlIsTarget { .. }))
        ));
        assert!(matches!(
            plan(3, QubitId(1), &[QubitId(0), QubitId(0)]),
            Err(SimError::Ir(IrError::DuplicateQubit { .. }))
        ));
    }
}
