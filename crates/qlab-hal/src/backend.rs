//! Backend trait and configuration.
//!
//! The [`Backend`] trait is the contract between the application layer and
//! an execution engine:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run() / run_statevector()
//! ```
//!
//! | Method | Returns |
//! |--------|---------|
//! | `name()` | `&str` |
//! | `capabilities()` | `&Capabilities` |
//! | `validate()` | `ValidationResult` |
//! | `run()` | `HalResult<ExecutionResult>` |
//! | `run_statevector()` | `HalResult<StatevectorResult>` |
//!
//! Execution is synchronous: a run returns once its result is complete.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::error::HalResult;
use crate::program::Program;
use crate::result::{ExecutionResult, StatevectorResult};

/// Configuration for a backend instance.
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Authentication token for hardware providers.
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Additional configuration (`max_qubits`, `statevector_max_qubits`, `seed`).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the authentication token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add extra configuration.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Read an unsigned integer from the extra map.
    pub fn extra_u64(&self, key: &str) -> Option<u64> {
        self.extra.get(key).and_then(serde_json::Value::as_u64)
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("name", &self.name)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("extra", &self.extra)
            .finish()
    }
}

/// Trait for execution engines.
///
/// # Contract
///
/// - `capabilities()` is infallible and cached at construction time.
/// - `run()` samples the program's measurements `shots` times; the counts
///   sum to `shots`.
/// - `run_statevector()` ignores measurements and returns the coherent
///   state, refusing programs above `capabilities().statevector_max_qubits`
///   before allocating anything.
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Validate a program against backend constraints.
    fn validate(&self, program: &Program) -> ValidationResult {
        let caps = self.capabilities();
        let mut reasons = Vec::new();

        if program.num_qubits() > caps.num_qubits {
            reasons.push(format!(
                "Program uses {} qubits but backend supports {}",
                program.num_qubits(),
                caps.num_qubits
            ));
        }
        for inst in program.instructions() {
            if !caps.gate_set.contains(&inst.op) {
                reasons.push(format!("Unsupported operation: {}", inst.op.qasm_name()));
            }
        }

        if reasons.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid { reasons }
        }
    }

    /// Execute the program and sample its measurements.
    fn run(&self, program: &Program, shots: u32) -> HalResult<ExecutionResult>;

    /// Compute the exact pre-measurement state of the program.
    fn run_statevector(&self, program: &Program) -> HalResult<StatevectorResult>;
}

/// Result of program validation against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Program can run as-is.
    Valid,
    /// Program cannot run on this backend.
    Invalid {
        /// Reasons the program is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the program is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}
