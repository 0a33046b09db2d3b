//! Single-qubit projective measurement.
//!
//! Probabilities come from the embedded projectors `M0 = |0⟩⟨0|` and
//! `M1 = |1⟩⟨1|`: `p_k = ψ† M_k† M_k ψ = ‖M_k ψ‖²`. Sampling draws
//! independent Bernoulli trials with success probability `p1`; collapse
//! replaces ψ by `M_k ψ / √p_k`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use qkron_ir::matrix::projector;
use qkron_ir::{Matrix, QubitId};

use crate::error::{SimError, SimResult};
use crate::statevector::StateVector;
use crate::unitary::embed;

/// Shot counts per outcome, serialized as `{"0": n0, "1": n1}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotDistribution {
    /// Shots that read 0.
    #[serde(rename = "0")]
    pub zeros: u32,
    /// Shots that read 1.
    #[serde(rename = "1")]
    pub ones: u32,
}

impl ShotDistribution {
    /// Total number of shots.
    pub fn total(&self) -> u32 {
        self.zeros + self.ones
    }

    /// Count for `outcome`.
    pub fn count(&self, outcome: u8) -> u32 {
        if outcome == 0 { self.zeros } else { self.ones }
    }
}

/// Sampled part of a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// Shot histogram.
    pub distribution: ShotDistribution,
    /// The outcome the state collapsed to.
    pub outcome: u8,
}

/// Result of measuring one qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Measured qubit.
    pub qubit: QubitId,
    /// Probability of reading 0.
    pub p0: f64,
    /// Probability of reading 1.
    pub p1: f64,
    /// Present when the measurement was simulated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<Simulation>,
}

impl MeasurementResult {
    /// The collapsed outcome, if simulated.
    pub fn outcome(&self) -> Option<u8> {
        self.simulation.as_ref().map(|s| s.outcome)
    }
}

/// Full-register projector onto `outcome` for `qubit`.
pub fn embedded_projector(
    register_size: usize,
    qubit: QubitId,
    outcome: u8,
) -> SimResult<Matrix> {
    embed(&projector(outcome), register_size, qubit, &[])
}

/// `(p0, p1)` for `qubit`.
///
/// Fails with [`SimError::Measurement`] when `|p0 + p1 - 1| > tolerance`.
pub fn probabilities(state: &StateVector, qubit: QubitId, tolerance: f64) -> SimResult<(f64, f64)> {
    let n = state.num_qubits();
    let p0 = projected_norm_sqr(state, &embedded_projector(n, qubit, 0)?);
    let p1 = projected_norm_sqr(state, &embedded_projector(n, qubit, 1)?);

    let drift = (p0 + p1 - 1.0).abs();
    if drift.is_nan() || drift > tolerance {
        return Err(SimError::Measurement { p0, p1 });
    }
    Ok((p0, p1))
}

fn projected_norm_sqr(state: &StateVector, projector: &Matrix) -> f64 {
    projector
        .dot(state.amplitudes())
        .iter()
        .map(|a| a.norm_sqr())
        .sum()
}

/// One Bernoulli draw with success probability `p1`.
pub fn draw<R: Rng + ?Sized>(rng: &mut R, p1: f64) -> u8 {
    u8::from(rng.gen_bool(p1.clamp(0.0, 1.0)))
}

/// `shots` independent draws.
pub fn sample_distribution<R: Rng + ?Sized>(rng: &mut R, p1: f64, shots: u32) -> ShotDistribution {
    let ones = (0..shots).filter(|_| draw(rng, p1) == 1).count() as u32;
    ShotDistribution {
        zeros: shots - ones,
        ones,
    }
}

/// Project `state` onto `outcome` for `qubit` and renormalize.
///
/// `probability` is the outcome's probability as returned by
/// [`probabilities`]; a zero-probability outcome cannot be collapsed to.
pub fn collapse(
    state: &mut StateVector,
    qubit: QubitId,
    outcome: u8,
    probability: f64,
    tolerance: f64,
) -> SimResult<()> {
    if probability <= 0.0 {
        return Err(SimError::InvalidState(format!(
            "cannot collapse {qubit} onto outcome {outcome} with probability {probability}"
        )));
    }
    let projector = embedded_projector(state.num_qubits(), qubit, outcome)?;
    let mut projected = state.clone();
    projected.apply_matrix(&projector)?;
    projected.renormalize(tolerance)?;
    *state = projected;
    Ok(())
}
