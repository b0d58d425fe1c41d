//! Backend capability introspection.
//!
//! [`Capabilities`] describe what an engine accepts: register size, shot
//! limit, native gate set and whether it exposes the full amplitude vector.
//! Backends cache them at construction time.

use serde::{Deserialize, Serialize};

use crate::program::Operation;

/// Capabilities of an execution engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Maximum number of qubits accepted for sampling.
    pub num_qubits: u32,
    /// Maximum number of qubits for which amplitudes may be requested.
    pub statevector_max_qubits: u32,
    /// Maximum number of shots per run.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or hardware (`false`).
    pub is_simulator: bool,
    /// Supported gate set (OpenQASM 3 naming).
    pub gate_set: GateSet,
}

impl Capabilities {
    /// Create capabilities for the local simulator.
    pub fn simulator(num_qubits: u32, statevector_max_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            statevector_max_qubits: statevector_max_qubits.min(num_qubits),
            max_shots: 1_000_000,
            is_simulator: true,
            gate_set: GateSet::standard(),
        }
    }

    /// Check if the backend supports statevector retrieval at all.
    pub fn supports_statevector(&self) -> bool {
        self.statevector_max_qubits > 0
    }
}

/// Set of operations a backend executes natively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
}

impl GateSet {
    /// The standard set every qlab circuit translates into.
    pub fn standard() -> Self {
        Self {
            single_qubit: ["h", "x", "y", "z", "s", "t", "rx", "ry", "rz"]
                .into_iter()
                .map(String::from)
                .collect(),
            two_qubit: vec!["cx".into(), "swap".into()],
        }
    }

    /// Check if an operation is supported. Measurement is always accepted.
    pub fn contains(&self, op: &Operation) -> bool {
        if op.is_measure() {
            return true;
        }
        let name = op.qasm_name();
        self.single_qubit.iter().any(|g| g == name) || self.two_qubit.iter().any(|g| g == name)
    }
}
