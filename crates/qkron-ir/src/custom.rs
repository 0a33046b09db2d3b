//! User-defined composite gates.
//!
//! A custom gate is a named list of blocks, each block being one catalog
//! gate at an index relative to the gate's anchor qubit. Scheduling a custom
//! gate expands it into ordinary operations, so circuits never store
//! anything but catalog gates.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::operation::Operation;
use crate::qubit::QubitId;

/// One step of a custom gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateBlock {
    /// Target index relative to the anchor qubit.
    pub index: u32,
    /// Catalog gate name.
    pub name: String,
    /// Control indexes relative to the anchor qubit.
    #[serde(default)]
    pub ctrl: Vec<u32>,
    /// Rotation angle, for rotation gates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl GateBlock {
    /// Create an uncontrolled block.
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            ctrl: vec![],
            angle: None,
        }
    }

    /// Add relative control indexes.
    #[must_use]
    pub fn with_ctrl(mut self, ctrl: impl IntoIterator<Item = u32>) -> Self {
        self.ctrl = ctrl.into_iter().collect();
        self
    }

    /// Set the rotation angle.
    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }
}

/// A named composite gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// Name used to schedule the gate.
    pub name: String,
    /// Blocks in application order.
    pub blocks: Vec<GateBlock>,
}

impl CustomGate {
    /// Create an empty definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: vec![],
        }
    }

    /// Append a block.
    #[must_use]
    pub fn with_block(mut self, block: GateBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Number of qubits spanned, counted from the anchor.
    pub fn width(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| std::iter::once(b.index).chain(b.ctrl.iter().copied()))
            .max()
            .map_or(0, |max| max as usize + 1)
    }

    /// Check the definition itself, independent of any register.
    pub fn validate(&self) -> IrResult<()> {
        if StandardGate::is_catalog_name(&self.name) {
            return Err(IrError::InvalidGate(format!(
                "custom gate '{}' shadows a catalog gate",
                self.name
            )));
        }
        if self.blocks.is_empty() {
            return Err(IrError::InvalidGate(format!(
                "custom gate '{}' has no blocks",
                self.name
            )));
        }
        for block in &self.blocks {
            StandardGate::from_name(&block.name, block.angle)?;
        }
        Ok(())
    }

    /// Expand into operations anchored at `anchor`, checked against a
    /// register of `num_qubits` qubits.
    pub fn operations(&self, anchor: QubitId, num_qubits: usize) -> IrResult<Vec<Operation>> {
        self.validate()?;
        self.blocks
            .iter()
            .map(|block| {
                let shift = |rel: u32| {
                    anchor
                        .0
                        .checked_add(rel)
                        .map(QubitId)
                        .ok_or_else(|| IrError::InvalidIndex {
                            qubit: QubitId(u32::MAX),
                            num_qubits,
                            gate_name: Some(self.name.clone()),
                        })
                };
                let controls = block
                    .ctrl
                    .iter()
                    .map(|&c| shift(c))
                    .collect::<IrResult<Vec<_>>>()?;
                let op = Operation::from_parts(
                    &block.name,
                    shift(block.index)?,
                    controls,
                    block.angle,
                )?;
                op.validate(num_qubits)?;
                Ok(op)
            })
            .collect()
    }
}
