//! Canonical demo circuits.
//!
//! Each builder returns an unlaunched circuit so callers can print the
//! diagram before running it.

use qkron_ir::QubitId;
use qkron_sim::{Circuit, SimResult, SimulatorConfig};

/// H on qubit 0 then CNOT 0 → 1: `(|00⟩ + |11⟩)/√2`.
pub fn bell(config: SimulatorConfig) -> SimResult<Circuit> {
    let mut circuit = Circuit::with_config(2, config)?;
    circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
    Ok(circuit)
}

/// `(|0…0⟩ + |1…1⟩)/√2` on `num_qubits` qubits, every CNOT controlled by
/// qubit 0 so most of them need routing.
pub fn ghz(num_qubits: usize, config: SimulatorConfig) -> SimResult<Circuit> {
    let mut circuit = Circuit::with_config(num_qubits, config)?;
    circuit.h(QubitId(0))?;
    for q in 1..num_qubits {
        circuit.cx(QubitId(0), QubitId::from(q))?;
    }
    Ok(circuit)
}

/// X on qubit 2, then X on qubit 0 controlled by qubit 2: `|101⟩`.
pub fn non_adjacent(config: SimulatorConfig) -> SimResult<Circuit> {
    let mut circuit = Circuit::with_config(3, config)?;
    circuit
        .x(QubitId(2))?
        .set_gate("X", QubitId(0), &[QubitId(2)], None)?;
    Ok(circuit)
}
