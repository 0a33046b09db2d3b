//! Exact statevector simulator
//!
//! Every operation is turned into its full `2^n x 2^n` unitary by Kronecker
//! composition and applied to a dense amplitude vector. Controlled gates
//! whose qubits are not adjacent are first routed into a contiguous block
//! by nearest-neighbour swaps, which are undone afterwards.
//!
//! # Components
//!
//! - [`unitary`]: Kronecker products and single-block embedding
//! - [`control`]: multi-controlled local matrices
//! - [`routing`]: adjacent-swap routing plans
//! - [`compose`]: the factored unitary of one operation
//! - [`StateVector`]: amplitudes, norms and marginals
//! - [`measurement`]: projector probabilities, sampling and collapse
//! - [`Circuit`]: the `Building → Executed` state machine tying it together
//!
//! # Example
//!
//! ```rust
//! use qkron_ir::QubitId;
//! use qkron_sim::{Circuit, SimulatorConfig};
//!
//! let config = SimulatorConfig::new().with_seed(42);
//! let mut circuit = Circuit::with_config(1, config).unwrap();
//! circuit.h(QubitId(0)).unwrap();
//! circuit.launch().unwrap();
//!
//! let result = circuit.measure(QubitId(0), 1000, true).unwrap();
//! assert!((result.p0 - 0.5).abs() < 1e-12);
//! assert_eq!(result.simulation.unwrap().distribution.total(), 1000);
//! ```

pub mod circuit;
pub mod compose;
pub mod config;
pub mod control;
pub mod error;
pub mod measurement;
pub mod routing;
pub mod statevector;
pub mod unitary;

pub use circuit::{Circuit, CircuitState, new_circuit};
pub use compose::{OperationUnitary, custom_gate_unitary};
pub use config::SimulatorConfig;
pub use error::{SimError, SimResult};
pub use measurement::{MeasurementResult, ShotDistribution, Simulation};
pub use routing::{AdjacentSwap, RoutingPlan};
pub use statevector::StateVector;
