//! Serializable circuit descriptions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::diagram;
use crate::error::{IrError, IrResult};
use crate::operation::Operation;

/// The persisted shape of a circuit: register size plus scheduled operations.
///
/// ```json
/// {"qubit_count": 2, "operations": [{"target_index": 0, "gate_name": "H", "controls": []}]}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitDescription {
    /// Number of qubits in the register.
    pub qubit_count: usize,
    /// Operations in application order.
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl CircuitDescription {
    /// Create an empty description.
    pub fn new(qubit_count: usize) -> Self {
        Self {
            qubit_count,
            operations: vec![],
        }
    }

    /// Append an operation.
    #[must_use]
    pub fn with_operation(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// Check every operation against `qubit_count`.
    pub fn validate(&self) -> IrResult<()> {
        if self.qubit_count == 0 {
            return Err(IrError::EmptyRegister);
        }
        self.operations
            .iter()
            .try_for_each(|op| op.validate(self.qubit_count))
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON.
    pub fn to_json_pretty(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a JSON description.
    pub fn from_json(json: &str) -> IrResult<Self> {
        let description: Self = serde_json::from_str(json)?;
        description.validate()?;
        Ok(description)
    }
}

impl fmt::Display for CircuitDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&diagram::render(self.qubit_count, &self.operations))
    }
}
