//! qlab Logical Circuit Model
//!
//! This crate holds the backend-agnostic description of a quantum program:
//! a fixed-size qubit register, an append-only gate sequence, and a list of
//! qubits to measure at the end. It performs no numeric work; translating a
//! circuit into something executable is the job of `qlab-hal`.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] is a plain index scoped to its owning circuit
//! - **Gates**: [`Gate`] is a closed sum type, one variant per gate kind,
//!   carrying only the operands that kind needs; [`GateKind`] is its tag
//! - **Circuit**: [`Circuit`] is the fluent builder
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qlab_ir::{Circuit, GateKind};
//!
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit.h(0).unwrap().cx(0, 1).unwrap().measure_all();
//!
//! assert_eq!(circuit.num_gates(), 2);
//! assert_eq!(circuit.gates()[1].kind(), GateKind::Cnot);
//! assert_eq!(circuit.measurements().len(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `T` | 1 | Phase gates (pi/2 and pi/4) |
//! | `RX`, `RY`, `RZ` | 1 | Rotation gates, angle in radians |
//! | `CNOT` | 2 | Controlled-NOT |
//! | `SWAP` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod qubit;

pub use circuit::{Circuit, DEFAULT_MAX_QUBITS};
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind};
pub use qubit::{ClbitId, QubitId};
