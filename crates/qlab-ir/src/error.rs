//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while building a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit count is zero or above the allowed maximum.
    #[error("Qubit count {count} is out of range (must be between 1 and {max})")]
    InvalidQubitCount {
        /// The requested qubit count.
        count: u32,
        /// The configured maximum.
        max: u32,
    },

    /// Qubit index is outside the circuit's register.
    #[error(
        "Qubit index {} is out of range for circuit size {num_qubits}{}",
        .qubit.0,
        format_gate_context(.gate)
    )]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Size of the circuit's register.
        num_qubits: u32,
        /// Optional gate name for context.
        gate: Option<&'static str>,
    },

    /// A multi-qubit gate names the same qubit twice.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate: Option<&'static str>,
    },

    /// A prefix longer than the gate sequence was requested.
    #[error("Cannot take the first {requested} gates of a circuit with {available}")]
    InvalidPrefix {
        /// Requested prefix length.
        requested: usize,
        /// Number of gates in the circuit.
        available: usize,
    },

    /// Gate name not recognized.
    #[error("Unknown gate '{0}'")]
    UnknownGate(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate: &Option<&'static str>) -> String {
    match gate {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
