//! Quantum gate types.

use std::fmt;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Gates of the catalog.
///
/// The set is closed: a name is resolved into one of these variants once,
/// when an operation is scheduled, and never re-parsed afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// Rotation around X by the given angle.
    Rx(f64),
    /// Rotation around Y by the given angle.
    Ry(f64),
    /// Rotation around Z by the given angle.
    Rz(f64),
    /// Two-qubit SWAP gate.
    Swap,
}

impl StandardGate {
    /// Every name the catalog understands, in canonical (upper-case) form.
    pub const NAMES: [&'static str; 8] = ["X", "Y", "Z", "H", "RX", "RY", "RZ", "SWAP"];

    /// Resolve a gate name.
    ///
    /// Names are matched case-insensitively. Rotation gates need `angle`;
    /// every other gate ignores it.
    pub fn from_name(name: &str, angle: Option<f64>) -> IrResult<Self> {
        let upper = name.to_ascii_uppercase();
        let rotation = |make: fn(f64) -> StandardGate| -> IrResult<StandardGate> {
            match angle {
                Some(theta) if theta.is_finite() => Ok(make(theta)),
                Some(theta) => Err(IrError::InvalidGate(format!(
                    "{upper} angle must be finite, got {theta}"
                ))),
                None => Err(IrError::MissingAngle {
                    gate: upper.clone(),
                }),
            }
        };

        match upper.as_str() {
            "X" => Ok(StandardGate::X),
            "Y" => Ok(StandardGate::Y),
            "Z" => Ok(StandardGate::Z),
            "H" => Ok(StandardGate::H),
            "RX" => rotation(StandardGate::Rx),
            "RY" => rotation(StandardGate::Ry),
            "RZ" => rotation(StandardGate::Rz),
            "SWAP" => Ok(StandardGate::Swap),
            _ => Err(IrError::UnknownGate {
                name: name.to_string(),
            }),
        }
    }

    /// Whether `name` refers to a catalog gate.
    pub fn is_catalog_name(name: &str) -> bool {
        let upper = name.to_ascii_uppercase();
        Self::NAMES.contains(&upper.as_str())
    }

    /// Get the canonical name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "X",
            StandardGate::Y => "Y",
            StandardGate::Z => "Z",
            StandardGate::H => "H",
            StandardGate::Rx(_) => "RX",
            StandardGate::Ry(_) => "RY",
            StandardGate::Rz(_) => "RZ",
            StandardGate::Swap => "SWAP",
        }
    }

    /// Number of qubits the bare gate acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::Swap => 2,
            _ => 1,
        }
    }

    /// Rotation angle, if this is a rotation gate.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(theta) | StandardGate::Ry(theta) | StandardGate::Rz(theta) => {
                Some(*theta)
            }
            _ => None,
        }
    }

    /// Check if this gate carries an angle.
    pub fn is_rotation(&self) -> bool {
        self.angle().is_some()
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.angle() {
            Some(theta) => write!(f, "{}({theta})", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

/// A catalog gate together with the qubits that condition it.
///
/// For every single-qubit gate `operands` are control qubits: the gate acts
/// iff all of them are |1⟩. For [`StandardGate::Swap`] the single operand is
/// the swap partner.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    /// The kind of gate.
    pub kind: StandardGate,
    /// Control qubits (or the swap partner), in the order given.
    pub operands: Vec<QubitId>,
}

impl Gate {
    /// Create an uncontrolled gate.
    pub fn standard(kind: StandardGate) -> Self {
        Self {
            kind,
            operands: vec![],
        }
    }

    /// Add control qubits to the gate.
    #[must_use]
    pub fn with_controls(mut self, controls: impl IntoIterator<Item = QubitId>) -> Self {
        self.operands = controls.into_iter().collect();
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Control qubits; empty for SWAP.
    pub fn controls(&self) -> &[QubitId] {
        match self.kind {
            StandardGate::Swap => &[],
            _ => &self.operands,
        }
    }

    /// The swap partner, for SWAP gates.
    pub fn swap_partner(&self) -> Option<QubitId> {
        match self.kind {
            StandardGate::Swap => self.operands.first().copied(),
            _ => None,
        }
    }

    /// Check whether the gate has control qubits.
    pub fn is_controlled(&self) -> bool {
        !self.controls().is_empty()
    }

    /// Total number of qubits touched (target included).
    pub fn num_qubits(&self) -> usize {
        1 + self.operands.len()
    }
}

impl From<StandardGate> for Gate {
    fn from(kind: StandardGate) -> Self {
        Gate::standard(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(StandardGate::from_name("h", None).unwrap(), StandardGate::H);
        assert_eq!(
            StandardGate::from_name("Swap", None).unwrap(),
            StandardGate::Swap
        );
        assert_eq!(
            StandardGate::from_name("rz", Some(PI)).unwrap(),
            StandardGate::Rz(PI)
        );
    }

    #[test]
    fn test_unknown_gate() {
        let err = StandardGate::from_name("CNOT", None).unwrap_err();
        assert!(matches!(err, IrError::UnknownGate { name } if name == "CNOT"));
        assert!(!StandardGate::is_catalog_name("T"));
        assert!(StandardGate::is_catalog_name("ry"));
    }

    #[test]
    fn test_rotation_needs_angle() {
        assert!(matches!(
            StandardGate::from_name("RX", None),
            Err(IrError::MissingAngle { .. })
        ));
        assert!(matches!(
            StandardGate::from_name("RY", Some(f64::NAN)),
            Err(IrError::InvalidGate(_))
        ));
        // Non-rotation gates ignore the angle.
        assert_eq!(
            StandardGate::from_name("X", Some(1.0)).unwrap(),
            StandardGate::X
        );
    }

    #[test]
    fn test_gate_properties() {
        assert_eq!(StandardGate::Swap.num_qubits(), 2);
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert!(StandardGate::Rx(0.5).is_rotation());
        assert_eq!(StandardGate::Rx(0.5).to_string(), "RX(0.5)");
        assert_eq!(StandardGate::Y.to_string(), "Y");
    }

    #[test]
    fn test_controls_and_partner() {
        let cx = Gate::standard(StandardGate::X).with_controls([QubitId(0), QubitId(2)]);
        assert!(cx.is_controlled());
        assert_eq!(cx.controls(), &[QubitId(0), QubitId(2)]);
        assert_eq!(cx.swap_partner(), None);
        assert_eq!(cx.num_qubits(), 3);

        let swap = Gate::standard(StandardGate::Swap).with_controls([QubitId(3)]);
        assert!(!swap.is_controlled());
        assert_eq!(swap.swap_partner(), Some(QubitId(3)));
    }
}
