//! qkron circuit description layer
//!
//! This crate holds everything about a circuit that is not simulation state:
//! the gate catalog, scheduled operations, user-defined composite gates and
//! the serializable description used to persist and restore circuits.
//!
//! # Core Components
//!
//! - **Gates**: [`StandardGate`], a closed set of catalog gates, and [`Gate`],
//!   a catalog gate plus its control qubits
//! - **Catalog matrices**: [`matrix_for`] and [`StandardGate::matrix`]
//! - **Operations**: [`Operation`], one column of a circuit
//! - **Custom gates**: [`CustomGate`], named sequences of catalog gates
//! - **Descriptions**: [`CircuitDescription`], the JSON-compatible form
//!
//! # Bit order
//!
//! Qubit 0 is the most significant bit of a basis-state index. On a 3-qubit
//! register, `|101⟩` (qubits 0 and 2 set) is index 5.
//!
//! # Example
//!
//! ```rust
//! use qkron_ir::{CircuitDescription, Operation, QubitId, StandardGate};
//!
//! let bell = CircuitDescription::new(2)
//!     .with_operation(Operation::new(QubitId(0), StandardGate::H))
//!     .with_operation(Operation::from_parts("X", QubitId(1), [QubitId(0)], None).unwrap());
//!
//! let json = bell.to_json().unwrap();
//! assert_eq!(CircuitDescription::from_json(&json).unwrap(), bell);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `RX`, `RY`, `RZ` | 1 | Rotation gates (take an angle) |
//! | `SWAP` | 2 | SWAP gate |
//!
//! Every single-qubit gate accepts any number of control qubits.

pub mod custom;
pub mod description;
pub mod diagram;
pub mod error;
pub mod gate;
pub mod matrix;
pub mod operation;
pub mod qubit;

pub use custom::{CustomGate, GateBlock};
pub use description::CircuitDescription;
pub use error::{IrError, IrResult};
pub use gate::{Gate, StandardGate};
pub use matrix::{Matrix, matrix_for};
pub use operation::{Operation, OperationRecord};
pub use qubit::QubitId;
