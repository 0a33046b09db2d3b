//! Qubit addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a qubit in the register.
///
/// Qubit 0 is the most significant bit of a basis-state index, so on an
/// `n`-qubit register qubit `q` selects bit `n - 1 - q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The register position as a `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Bit mask selecting this qubit in a basis-state index.
    #[inline]
    pub fn mask(self, num_qubits: usize) -> usize {
        1 << (num_qubits - 1 - self.index())
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).expect("QubitId overflow: exceeds u32::MAX"))
    }
}
