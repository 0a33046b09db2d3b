//! Dense statevector.

use ndarray::Array1;
use num_complex::Complex64;
use std::fmt;

use qkron_ir::{IrError, Matrix, QubitId};

use crate::compose::OperationUnitary;
use crate::error::{SimError, SimResult};

/// A statevector representing a quantum state.
///
/// Amplitude `i` belongs to the basis state whose binary expansion of `i`
/// lists qubit 0 first (most significant bit).
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Array1<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl StateVector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = Array1::zeros(1 << num_qubits);
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Wrap raw amplitudes. The length must be a power of two, at least 2.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(SimError::DimensionMismatch {
                expected: len.next_power_of_two().max(2),
                got: len,
            });
        }
        Ok(Self {
            num_qubits: len.trailing_zeros() as usize,
            amplitudes: Array1::from(amplitudes),
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// The amplitudes in basis-index order.
    pub fn amplitudes(&self) -> &Array1<Complex64> {
        &self.amplitudes
    }

    /// Copy of the amplitudes as a plain vector.
    pub fn to_vec(&self) -> Vec<Complex64> {
        self.amplitudes.to_vec()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.amplitudes
            .iter()
            .map(Complex64::norm_sqr)
            .sum::<f64>()
            .sqrt()
    }

    /// Divide by the norm.
    ///
    /// A norm at or below `tolerance` (or non-finite) means the state has
    /// been destroyed; that is an invariant violation and is reported as
    /// [`SimError::InvalidState`].
    pub fn renormalize(&mut self, tolerance: f64) -> SimResult<()> {
        let norm = self.norm();
        if !norm.is_finite() || norm <= tolerance {
            return Err(SimError::InvalidState(format!(
                "state vector norm is {norm}, cannot renormalize"
            )));
        }
        self.amplitudes.mapv_inplace(|a| a / norm);
        Ok(())
    }

    /// Left-multiply by a full-register matrix.
    pub fn apply_matrix(&mut self, matrix: &Matrix) -> SimResult<()> {
        if matrix.dim() != (self.dim(), self.dim()) {
            return Err(SimError::DimensionMismatch {
                expected: self.dim(),
                got: matrix.nrows(),
            });
        }
        self.amplitudes = matrix.dot(&self.amplitudes);
        Ok(())
    }

    /// Apply an operation's unitary.
    pub fn apply(&mut self, unitary: &OperationUnitary) -> SimResult<()> {
        if unitary.dim() != self.dim() {
            return Err(SimError::DimensionMismatch {
                expected: self.dim(),
                got: unitary.dim(),
            });
        }
        self.amplitudes = unitary.apply(&self.amplitudes);
        Ok(())
    }

    /// Probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Marginal `(p0, p1)` of a single qubit, summed straight from the
    /// amplitudes.
    pub fn marginal(&self, qubit: QubitId) -> SimResult<(f64, f64)> {
        if qubit.index() >= self.num_qubits {
            return Err(IrError::InvalidIndex {
                qubit,
                num_qubits: self.num_qubits,
                gate_name: None,
            }
            .into());
        }
        let mask = qubit.mask(self.num_qubits);
        let (mut p0, mut p1) = (0.0, 0.0);
        for (i, amp) in self.amplitudes.iter().enumerate() {
            if i & mask == 0 {
                p0 += amp.norm_sqr();
            } else {
                p1 += amp.norm_sqr();
            }
        }
        Ok((p0, p1))
    }

    /// Check amplitude-wise closeness to `other`.
    pub fn approx_eq(&self, other: &[Complex64], tolerance: f64) -> bool {
        self.dim() == other.len()
            && self
                .amplitudes
                .iter()
                .zip(other)
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// Convert a basis index to its bitstring, qubit 0 first.
    pub fn outcome_to_bitstring(&self, outcome: usize) -> String {
        format!("{:0width$b}", outcome, width = self.num_qubits)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, amp) in self.amplitudes.iter().enumerate() {
            writeln!(f, "|{}⟩: {amp}", self.outcome_to_bitstring(i))?;
        }
        Ok(())
    }
}
