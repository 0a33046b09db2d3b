//! Simulator configuration.

use serde::{Deserialize, Serialize};

/// Settings shared by every circuit created with them.
///
/// All fields have defaults, so a partial YAML or JSON document is enough:
///
/// ```rust
/// use qkron_sim::SimulatorConfig;
///
/// let config: SimulatorConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.default_shots, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest register accepted. Every operation materializes a
    /// `2^n x 2^n` matrix, so memory grows as `16 * 4^n` bytes.
    pub max_qubits: usize,
    /// Shot count used by [`Circuit::measure_default`](crate::Circuit::measure_default).
    pub default_shots: u32,
    /// Tolerance for the `p0 + p1 ≈ 1` check and the zero-norm guard.
    pub tolerance: f64,
    /// RNG seed for reproducible sampling; entropy-seeded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: 10,
            default_shots: 1000,
            tolerance: 1e-9,
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the register size limit.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the default shot count.
    #[must_use]
    pub fn with_default_shots(mut self, shots: u32) -> Self {
        self.default_shots = shots;
        self
    }

    /// Set the numerical tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Seed the sampling RNG.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
