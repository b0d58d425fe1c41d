//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in backend operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// No backend registered under the requested name.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// Program needs more qubits than the backend supports.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// Statevector requested above the configured ceiling.
    #[error(
        "Statevector disabled for {num_qubits} qubits (limit is {max}; the state has 2^n amplitudes)"
    )]
    StatevectorTooLarge {
        /// Qubits in the program.
        num_qubits: u32,
        /// Configured ceiling.
        max: u32,
    },

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Sampling requested for a program that measures nothing.
    #[error("Program has no measurements; nothing to sample")]
    NoMeasurements,

    /// Program is malformed for this backend.
    #[error("Invalid program: {0}")]
    InvalidProgram(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unsupported feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Execution failed inside the engine.
    #[error("Execution failed: {0}")]
    Execution(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
