//! qlab Local Statevector Simulator
//!
//! This crate provides the local execution engine behind qlab. It uses
//! statevector simulation, which gives exact amplitudes but costs 2^n memory.
//!
//! # Features
//!
//! - **Exact Simulation**: full statevector, little-endian basis order
//! - **Single-pass Sampling**: the program is simulated once and its
//!   measurements are drawn `shots` times from the final distribution
//! - **Reproducible Runs**: an optional seed fixes the sampler
//! - **Statevector Ceiling**: amplitude requests above a configured qubit
//!   count are refused before any allocation
//!
//! # Memory
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//! | 24 | ~256 MB (engine ceiling) |
//!
//! # Example
//!
//! ```
//! use qlab_adapter_sim::SimulatorBackend;
//! use qlab_hal::{Backend, translate};
//! use qlab_ir::Circuit;
//!
//! let mut circuit = Circuit::new(2)?;
//! circuit.h(0)?.cx(0, 1)?.measure_all();
//!
//! let backend = SimulatorBackend::new().with_seed(42);
//! let result = backend.run(&translate(&circuit), 1000)?;
//!
//! // A Bell pair only ever reads 00 or 11.
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod simulator;
mod statevector;

pub use simulator::{
    DEFAULT_MAX_QUBITS, DEFAULT_STATEVECTOR_MAX_QUBITS, ENGINE_MAX_QUBITS, SimulatorBackend,
};
