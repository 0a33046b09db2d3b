//! Error types for the simulator crate.

use qkron_ir::IrError;
use thiserror::Error;

/// Errors produced while building or running a simulation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Invalid gate name, index or definition.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Register larger than the configured limit.
    #[error("Circuit has {requested} qubits but the simulator only supports {max}")]
    TooManyQubits {
        /// Requested register size.
        requested: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Operation not allowed in the circuit's current state, or an internal
    /// invariant no longer holds.
    #[error("Invalid circuit state: {0}")]
    InvalidState(String),

    /// Projective probabilities no longer sum to one; the state vector is
    /// corrupted and the circuit should be discarded.
    #[error("Measurement probabilities do not sum to 1 (p0 = {p0}, p1 = {p1})")]
    Measurement {
        /// Probability of outcome 0.
        p0: f64,
        /// Probability of outcome 1.
        p1: f64,
    },

    /// A matrix or vector has the wrong shape.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        got: usize,
    },
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ir_errors_pass_through() {
        let err: SimError = IrError::UnknownGate { name: "T".into() }.into();
        assert_eq!(err.to_string(), "Unknown gate 'T'");
        assert!(matches!(err, SimError::Ir(IrError::UnknownGate { .. })));
    }
}
