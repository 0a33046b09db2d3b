//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while describing a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate name is not in the catalog (nor a registered custom gate).
    #[error("Unknown gate '{name}'")]
    UnknownGate {
        /// The name that failed to resolve.
        name: String,
    },

    /// Rotation gate requested without an angle.
    #[error("Gate '{gate}' requires an angle")]
    MissingAngle {
        /// Name of the rotation gate.
        gate: String,
    },

    /// Qubit index outside `[0, num_qubits)`.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit register{}", format_gate_context(.gate_name))]
    InvalidIndex {
        /// The offending qubit.
        qubit: QubitId,
        /// Register size at the time of the check.
        num_qubits: usize,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A control index coincides with the target index.
    #[error("Control {qubit} is also the target{}", format_gate_context(.gate_name))]
    ControlIsTarget {
        /// The qubit used twice.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// The same qubit appears twice in the control list.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A circuit needs at least one qubit.
    #[error("Register must hold at least one qubit")]
    EmptyRegister,

    /// Gate cannot be used the way it was requested.
    #[error("Invalid gate: {0}")]
    InvalidGate(String),

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
