//! Scheduled circuit steps.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::qubit::QubitId;

/// One column of a circuit: a gate applied to a target qubit.
///
/// Operations are immutable once scheduled; the serialized form is
/// `{target_index, gate_name, controls, angle?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "OperationRecord", try_from = "OperationRecord")]
pub struct Operation {
    /// The qubit the gate acts on.
    pub target: QubitId,
    /// The gate and its controls.
    pub gate: Gate,
}

impl Operation {
    /// Create an operation without validating indexes.
    pub fn new(target: QubitId, gate: impl Into<Gate>) -> Self {
        Self {
            target,
            gate: gate.into(),
        }
    }

    /// Resolve `name` through the catalog and build the operation.
    pub fn from_parts(
        name: &str,
        target: QubitId,
        controls: impl IntoIterator<Item = QubitId>,
        angle: Option<f64>,
    ) -> IrResult<Self> {
        let kind = StandardGate::from_name(name, angle)?;
        Ok(Self::new(target, Gate::standard(kind).with_controls(controls)))
    }

    /// Gate name.
    pub fn name(&self) -> &'static str {
        self.gate.name()
    }

    /// Every qubit this operation touches: target first, then operands.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        std::iter::once(self.target).chain(self.gate.operands.iter().copied())
    }

    /// Check the operation against a register of `num_qubits` qubits.
    ///
    /// Fails when an index is out of range, a control equals the target, a
    /// qubit is listed twice, or a SWAP does not name exactly one partner.
    pub fn validate(&self, num_qubits: usize) -> IrResult<()> {
        let gate_name = || Some(self.name().to_string());

        for qubit in self.qubits() {
            if qubit.index() >= num_qubits {
                return Err(IrError::InvalidIndex {
                    qubit,
                    num_qubits,
                    gate_name: gate_name(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &self.gate.operands {
            if qubit == self.target {
                return Err(IrError::ControlIsTarget {
                    qubit,
                    gate_name: gate_name(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name(),
                });
            }
        }

        if self.gate.kind == StandardGate::Swap && self.gate.operands.len() != 1 {
            return Err(IrError::InvalidGate(format!(
                "SWAP needs exactly one partner qubit, got {}",
                self.gate.operands.len()
            )));
        }

        Ok(())
    }

    /// Same operation with every qubit index mapped through `f`.
    #[must_use]
    pub fn remap(&self, f: impl Fn(QubitId) -> QubitId) -> Self {
        Self {
            target: f(self.target),
            gate: Gate {
                kind: self.gate.kind,
                operands: self.gate.operands.iter().map(|&q| f(q)).collect(),
            },
        }
    }
}

/// Wire form of an [`Operation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    /// Target qubit index.
    pub target_index: u32,
    /// Catalog name of the gate.
    pub gate_name: String,
    /// Control indexes (the partner for SWAP).
    #[serde(default)]
    pub controls: Vec<u32>,
    /// Rotation angle in radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl From<Operation> for OperationRecord {
    fn from(op: Operation) -> Self {
        Self {
            target_index: op.target.0,
            gate_name: op.name().to_string(),
            controls: op.gate.operands.iter().map(|q| q.0).collect(),
            angle: op.gate.kind.angle(),
        }
    }
}

impl TryFrom<OperationRecord> for Operation {
    type Error = IrError;

    fn try_from(record: OperationRecord) -> IrResult<Self> {
        Operation::from_parts(
            &record.gate_name,
            QubitId(record.target_index),
            record.controls.into_iter().map(QubitId),
            record.angle,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        let op = Operation::from_parts("x", QubitId(1), [QubitId(0)], None).unwrap();
        assert_eq!(op.name(), "X");
        assert_eq!(op.target, QubitId(1));
        assert_eq!(op.gate.controls(), &[QubitId(0)]);
        assert!(op.validate(2).is_ok());
    }

    #[test]
    fn test_validate_out_of_range() {
        let op = Operation::new(QubitId(3), StandardGate::H);
        assert!(matches!(
            op.validate(3),
            Err(IrError::InvalidIndex { qubit: QubitId(3), num_qubits: 3, .. })
        ));

        let op = Operation::from_parts("X", QubitId(0), [QubitId(5)], None).unwrap();
        assert!(matches!(op.validate(3), Err(IrError::InvalidIndex { .. })));
    }

    #[test]
    fn test_validate_control_is_target() {
        let op = Operation::from_parts("Z", QubitId(1), [QubitId(1)], None).unwrap();
        assert!(matches!(op.validate(2), Err(IrError::ControlIsTarget { .. })));
    }

    #[test]
    fn test_validate_duplicate_control() {
        let op = Operation::from_parts("Z", QubitId(0), [QubitId(1), QubitId(1)], None).unwrap();
        assert!(matches!(op.validate(3), Err(IrError::DuplicateQubit { .. })));
    }

    #[test]
    fn test_swap_needs_one_partner() {
        let bare = Operation::new(QubitId(0), StandardGate::Swap);
        assert!(matches!(bare.validate(2), Err(IrError::InvalidGate(_))));

        let controlled =
            Operation::from_parts("SWAP", QubitId(0), [QubitId(1), QubitId(2)], None).unwrap();
        assert!(matches!(controlled.validate(3), Err(IrError::InvalidGate(_))));

        let ok = Operation::from_parts("SWAP", QubitId(0), [QubitId(2)], None).unwrap();
        assert!(ok.validate(3).is_ok());
    }

    #[test]
    fn test_json_shape() {
        let op = Operation::from_parts("RY", QubitId(2), [QubitId(0)], Some(0.25)).unwrap();
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "target_index": 2,
                "gate_name": "RY",
                "controls": [0],
                "angle": 0.25
            })
        );

        let plain = Operation::new(QubitId(0), StandardGate::H);
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("angle").is_none());
    }

    #[test]
    fn test_deserialize_rejects_unknown_gate() {
        let result: Result<Operation, _> =
            serde_json::from_str(r#"{"target_index": 0, "gate_name": "CNOT", "controls": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_remap() {
        let op = Operation::from_parts("X", QubitId(0), [QubitId(2)], None).unwrap();
        let shifted = op.remap(|q| QubitId(q.0 + 1));
        assert_eq!(shifted.target, QubitId(1));
        assert_eq!(shifted.gate.operands, vec![QubitId(3)]);
    }
}
