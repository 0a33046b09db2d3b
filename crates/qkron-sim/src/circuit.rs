//! Executable circuit: operation schedule plus live state vector.

use std::time::Instant;

use num_complex::Complex64;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use qkron_ir::{CircuitDescription, CustomGate, IrError, Operation, QubitId, StandardGate, diagram};

use crate::compose::OperationUnitary;
use crate::config::SimulatorConfig;
use crate::error::{SimError, SimResult};
use crate::measurement::{self, MeasurementResult, Simulation};
use crate::statevector::StateVector;

/// Lifecycle of a [`Circuit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircuitState {
    /// Nothing has touched the state vector yet; the register may be resized.
    Building,
    /// `launch` ran (or a measurement collapsed the state).
    Executed,
}

/// Create a circuit of `qubit_count` qubits with default settings.
pub fn new_circuit(qubit_count: usize) -> SimResult<Circuit> {
    Circuit::new(qubit_count)
}

/// A quantum register and the operations scheduled on it.
///
/// Operations are appended with [`set_gate`](Self::set_gate) and applied in
/// order by [`launch`](Self::launch). `launch` keeps a cursor into the
/// schedule, so calling it again only runs operations appended since the
/// previous call.
///
/// ```rust
/// use qkron_ir::QubitId;
/// use qkron_sim::Circuit;
///
/// let mut circuit = Circuit::new(2).unwrap();
/// circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
/// circuit.launch().unwrap();
///
/// let amps = circuit.amplitudes();
/// assert!((amps[0].re - amps[3].re).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Circuit {
    num_qubits: usize,
    state: StateVector,
    classical: Vec<Option<MeasurementResult>>,
    operations: Vec<Operation>,
    /// Index of the first operation not yet applied.
    cursor: usize,
    phase: CircuitState,
    custom_gates: FxHashMap<String, CustomGate>,
    config: SimulatorConfig,
    rng: StdRng,
}

impl Circuit {
    /// Create a circuit in |0...0⟩ with default settings.
    pub fn new(num_qubits: usize) -> SimResult<Self> {
        Self::with_config(num_qubits, SimulatorConfig::default())
    }

    /// Create a circuit in |0...0⟩.
    pub fn with_config(num_qubits: usize, config: SimulatorConfig) -> SimResult<Self> {
        if num_qubits == 0 {
            return Err(IrError::EmptyRegister.into());
        }
        if num_qubits > config.max_qubits {
            return Err(SimError::TooManyQubits {
                requested: num_qubits,
                max: config.max_qubits,
            });
        }

        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        info!("Created circuit with {} qubits", num_qubits);

        Ok(Self {
            num_qubits,
            state: StateVector::new(num_qubits),
            classical: vec![None; num_qubits],
            operations: vec![],
            cursor: 0,
            phase: CircuitState::Building,
            custom_gates: FxHashMap::default(),
            config,
            rng,
        })
    }

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Append `name` on `target` with optional `controls` and `angle`.
    ///
    /// `name` is looked up in the gate catalog first, then among gates
    /// registered with [`define_gate`](Self::define_gate). For `SWAP`,
    /// `controls` holds the single partner qubit. Nothing is appended when
    /// validation fails, and the state vector is never touched.
    pub fn set_gate(
        &mut self,
        name: &str,
        target: QubitId,
        controls: &[QubitId],
        angle: Option<f64>,
    ) -> SimResult<&mut Self> {
        let ops = if StandardGate::is_catalog_name(name) {
            let op = Operation::from_parts(name, target, controls.iter().copied(), angle)?;
            op.validate(self.num_qubits)?;
            vec![op]
        } else {
            self.expand_custom(name, target, controls, angle)?
        };

        for op in &ops {
            debug!("Scheduled {} on {}", op.name(), op.target);
        }
        self.operations.extend(ops);
        Ok(self)
    }

    fn expand_custom(
        &self,
        name: &str,
        target: QubitId,
        controls: &[QubitId],
        angle: Option<f64>,
    ) -> SimResult<Vec<Operation>> {
        let gate = self
            .custom_gates
            .get(&name.to_ascii_uppercase())
            .ok_or_else(|| IrError::UnknownGate {
                name: name.to_string(),
            })?;
        if !controls.is_empty() || angle.is_some() {
            return Err(IrError::InvalidGate(format!(
                "custom gate '{}' takes no controls or angle",
                gate.name
            ))
            .into());
        }
        Ok(gate.operations(target, self.num_qubits)?)
    }

    /// Register a composite gate usable by name in [`set_gate`](Self::set_gate).
    pub fn define_gate(&mut self, gate: CustomGate) -> SimResult<&mut Self> {
        gate.validate()?;
        let key = gate.name.to_ascii_uppercase();
        debug!("Defined custom gate {} with {} blocks", key, gate.blocks.len());
        if self.custom_gates.insert(key, gate).is_some() {
            warn!("Replaced an existing custom gate definition");
        }
        Ok(self)
    }

    /// Append a Pauli-X.
    pub fn x(&mut self, qubit: QubitId) -> SimResult<&mut Self> {
        self.set_gate("X", qubit, &[], None)
    }

    /// Append a Pauli-Y.
    pub fn y(&mut self, qubit: QubitId) -> SimResult<&mut Self> {
        self.set_gate("Y", qubit, &[], None)
    }

    /// Append a Pauli-Z.
    pub fn z(&mut self, qubit: QubitId) -> SimResult<&mut Self> {
        self.set_gate("Z", qubit, &[], None)
    }

    /// Append a Hadamard.
    pub fn h(&mut self, qubit: QubitId) -> SimResult<&mut Self> {
        self.set_gate("H", qubit, &[], None)
    }

    /// Append an RX rotation.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> SimResult<&mut Self> {
        self.set_gate("RX", qubit, &[], Some(theta))
    }

    /// Append an RY rotation.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> SimResult<&mut Self> {
        self.set_gate("RY", qubit, &[], Some(theta))
    }

    /// Append an RZ rotation.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> SimResult<&mut Self> {
        self.set_gate("RZ", qubit, &[], Some(theta))
    }

    /// Append a CNOT.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> SimResult<&mut Self> {
        self.set_gate("X", target, &[control], None)
    }

    /// Append a controlled-Z.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> SimResult<&mut Self> {
        self.set_gate("Z", target, &[control], None)
    }

    /// Append a Toffoli.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> SimResult<&mut Self> {
        self.set_gate("X", target, &[c1, c2], None)
    }

    /// Append a SWAP of `a` and `b`.
    pub fn swap(&mut self, a: QubitId, b: QubitId) -> SimResult<&mut Self> {
        self.set_gate("SWAP", a, &[b], None)
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Apply every pending operation in order, renormalizing after each.
    #[instrument(skip(self), fields(num_qubits = self.num_qubits))]
    pub fn launch(&mut self) -> SimResult<()> {
        let pending = self.pending();
        let start = Instant::now();

        while let Some(op) = self.operations.get(self.cursor) {
            let unitary = OperationUnitary::for_operation(op, self.num_qubits)?;
            debug!(
                "Applying {} on {} with {} routing swaps",
                op.name(),
                op.target,
                unitary.swap_count()
            );
            self.state.apply(&unitary)?;
            self.state.renormalize(self.config.tolerance)?;
            self.cursor += 1;
        }

        self.phase = CircuitState::Executed;
        debug!("Applied {} operations in {:?}", pending, start.elapsed());
        Ok(())
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Measure `qubit`.
    ///
    /// Always returns `(p0, p1)`. With `simulate`, also samples `shots`
    /// Bernoulli trials, draws one more outcome and collapses the state onto
    /// it. The result is recorded in the classical register either way.
    #[instrument(skip(self))]
    pub fn measure(
        &mut self,
        qubit: QubitId,
        shots: u32,
        simulate: bool,
    ) -> SimResult<MeasurementResult> {
        if qubit.index() >= self.num_qubits {
            return Err(IrError::InvalidIndex {
                qubit,
                num_qubits: self.num_qubits,
                gate_name: None,
            }
            .into());
        }
        if self.pending() > 0 {
            warn!(
                "Measuring with {} operations not yet launched",
                self.pending()
            );
        }

        let tolerance = self.config.tolerance;
        let (p0, p1) = measurement::probabilities(&self.state, qubit, tolerance)?;

        let simulation = if simulate {
            let distribution = measurement::sample_distribution(&mut self.rng, p1, shots);
            let outcome = measurement::draw(&mut self.rng, p1);
            let probability = if outcome == 0 { p0 } else { p1 };
            measurement::collapse(&mut self.state, qubit, outcome, probability, tolerance)?;
            self.phase = CircuitState::Executed;
            debug!("Collapsed {} to {}", qubit, outcome);
            Some(Simulation {
                distribution,
                outcome,
            })
        } else {
            None
        };

        let result = MeasurementResult {
            qubit,
            p0,
            p1,
            simulation,
        };
        self.classical[qubit.index()] = Some(result.clone());
        Ok(result)
    }

    /// Measure with the configured default shot count.
    pub fn measure_default(&mut self, qubit: QubitId, simulate: bool) -> SimResult<MeasurementResult> {
        self.measure(qubit, self.config.default_shots, simulate)
    }

    /// Measure every qubit in increasing index order. With `simulate`, each
    /// measurement sees the state left by the previous collapses.
    #[instrument(skip(self))]
    pub fn measure_all(&mut self, shots: u32, simulate: bool) -> SimResult<Vec<MeasurementResult>> {
        (0..self.num_qubits)
            .map(|q| self.measure(QubitId::from(q), shots, simulate))
            .collect()
    }

    // =========================================================================
    // Register resizing
    // =========================================================================

    /// Insert a qubit at `at` (appended when `None`) and return its index.
    ///
    /// Scheduled operations on qubits at or above `at` shift up by one. The
    /// state vector and classical register are reset.
    pub fn add_qubit(&mut self, at: Option<QubitId>) -> SimResult<QubitId> {
        self.ensure_building("add a qubit")?;
        let new_size = self.num_qubits + 1;
        if new_size > self.config.max_qubits {
            return Err(SimError::TooManyQubits {
                requested: new_size,
                max: self.config.max_qubits,
            });
        }
        let at = at.unwrap_or(QubitId::from(self.num_qubits));
        if at.index() > self.num_qubits {
            return Err(IrError::InvalidIndex {
                qubit: at,
                num_qubits: new_size,
                gate_name: None,
            }
            .into());
        }

        self.operations = self
            .operations
            .iter()
            .map(|op| op.remap(|q| if q >= at { QubitId(q.0 + 1) } else { q }))
            .collect();
        self.resize(new_size);
        info!("Inserted {}, register now has {} qubits", at, new_size);
        Ok(at)
    }

    /// Remove `qubit`. Scheduled operations on higher qubits shift down.
    ///
    /// Rejected if any scheduled operation uses `qubit` or if it is the last
    /// qubit of the register.
    pub fn delete_qubit(&mut self, qubit: QubitId) -> SimResult<()> {
        self.ensure_building("delete a qubit")?;
        if qubit.index() >= self.num_qubits {
            return Err(IrError::InvalidIndex {
                qubit,
                num_qubits: self.num_qubits,
                gate_name: None,
            }
            .into());
        }
        if self.num_qubits == 1 {
            return Err(IrError::EmptyRegister.into());
        }
        if let Some(op) = self.operations.iter().find(|op| op.qubits().any(|q| q == qubit)) {
            return Err(SimError::InvalidState(format!(
                "{qubit} is used by a scheduled {} on {}",
                op.name(),
                op.target
            )));
        }

        self.operations = self
            .operations
            .iter()
            .map(|op| op.remap(|q| if q > qubit { QubitId(q.0 - 1) } else { q }))
            .collect();
        self.resize(self.num_qubits - 1);
        info!("Deleted {}, register now has {} qubits", qubit, self.num_qubits);
        Ok(())
    }

    fn ensure_building(&self, action: &str) -> SimResult<()> {
        match self.phase {
            CircuitState::Building => Ok(()),
            CircuitState::Executed => Err(SimError::InvalidState(format!(
                "cannot {action} after the circuit has been executed"
            ))),
        }
    }

    fn resize(&mut self, num_qubits: usize) {
        self.num_qubits = num_qubits;
        self.state = StateVector::new(num_qubits);
        self.classical = vec![None; num_qubits];
        self.cursor = 0;
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// The persisted form: register size and operations.
    pub fn serialize(&self) -> CircuitDescription {
        CircuitDescription {
            qubit_count: self.num_qubits,
            operations: self.operations.clone(),
        }
    }

    /// Rebuild a circuit from its description with default settings. The
    /// result is in state `Building`; nothing has been applied.
    pub fn deserialize(description: &CircuitDescription) -> SimResult<Self> {
        Self::deserialize_with_config(description, SimulatorConfig::default())
    }

    /// Rebuild a circuit from its description.
    pub fn deserialize_with_config(
        description: &CircuitDescription,
        config: SimulatorConfig,
    ) -> SimResult<Self> {
        description.validate()?;
        let mut circuit = Self::with_config(description.qubit_count, config)?;
        circuit.operations = description.operations.clone();
        Ok(circuit)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> SimResult<String> {
        Ok(self.serialize().to_json()?)
    }

    /// Parse a JSON description.
    pub fn from_json(json: &str) -> SimResult<Self> {
        Self::deserialize(&CircuitDescription::from_json(json)?)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The live state.
    pub fn state_vector(&self) -> &StateVector {
        &self.state
    }

    /// Amplitudes in basis-index order.
    pub fn amplitudes(&self) -> Vec<Complex64> {
        self.state.to_vec()
    }

    /// All scheduled operations, applied or not.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations not yet applied.
    pub fn pending(&self) -> usize {
        self.operations.len() - self.cursor
    }

    /// Current lifecycle state.
    pub fn phase(&self) -> CircuitState {
        self.phase
    }

    /// Last measurement recorded for each qubit.
    pub fn classical_register(&self) -> &[Option<MeasurementResult>] {
        &self.classical
    }

    /// Active settings.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Text diagram of the schedule.
    pub fn diagram(&self) -> String {
        diagram::render(self.num_qubits, &self.operations)
    }
}
