//! Target-state challenges.
//!
//! A challenge names a state to prepare. A submitted circuit passes when it
//! has the right register size and its coherent state matches the target
//! with fidelity above [`FIDELITY_THRESHOLD`].

use tracing::{debug, info};

use qlab_hal::{Backend, translate};
use qlab_ir::Circuit;

use crate::error::{AppError, AppResult};
use crate::presets;

/// Fidelity a solution must exceed to pass.
pub const FIDELITY_THRESHOLD: f64 = 0.99;

/// One challenge.
#[derive(Debug, Clone)]
pub struct Challenge {
    /// Lookup key, e.g. `bell_state`.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// What to build.
    pub description: &'static str,
    /// Register size the solution must use.
    pub num_qubits: u32,
    target: Circuit,
}

impl Challenge {
    /// Reference circuit preparing the target state.
    pub fn target(&self) -> &Circuit {
        &self.target
    }
}

/// Outcome of checking a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeOutcome {
    /// Whether the solution passed.
    pub passed: bool,
    /// State fidelity, when the register sizes matched.
    pub fidelity: Option<f64>,
    /// Message for the user.
    pub message: String,
}

/// Holds the challenge catalogue and the current selection.
#[derive(Debug, Clone)]
pub struct ChallengeManager {
    challenges: Vec<Challenge>,
    current: Option<usize>,
}

impl ChallengeManager {
    /// Build the standard catalogue.
    pub fn new() -> AppResult<Self> {
        let mut plus = Circuit::new(1)?;
        plus.h(0)?;

        let challenges = vec![
            Challenge {
                key: "plus_state",
                name: "Superposition Maker",
                description: "Create the |+> state: (|0> + |1>) / sqrt(2).",
                num_qubits: 1,
                target: plus,
            },
            Challenge {
                key: "bell_state",
                name: "Bell State Engineer",
                description: "Create the Bell state |Phi+>: (|00> + |11>) / sqrt(2).",
                num_qubits: 2,
                target: presets::bell(2)?,
            },
            Challenge {
                key: "ghz_state",
                name: "GHZ Creator",
                description: "Create a 3-qubit GHZ state: (|000> + |111>) / sqrt(2).",
                num_qubits: 3,
                target: presets::ghz(3, 3)?,
            },
        ];
        Ok(Self {
            challenges,
            current: None,
        })
    }

    /// All challenges in catalogue order.
    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    /// Select a challenge by key. `"key: Name"` labels are accepted too.
    pub fn select(&mut self, label: &str) -> AppResult<&Challenge> {
        let key = label.split(':').next().unwrap_or_default().trim();
        let idx = self
            .challenges
            .iter()
            .position(|c| c.key == key)
            .ok_or_else(|| AppError::Challenge(format!("Unknown challenge: {key}")))?;
        self.current = Some(idx);
        debug!(key, "challenge selected");
        Ok(&self.challenges[idx])
    }

    /// The selected challenge, if any.
    pub fn current(&self) -> Option<&Challenge> {
        self.current.map(|idx| &self.challenges[idx])
    }

    /// Check `circuit` against the selected challenge.
    ///
    /// A wrong answer is a failed outcome, not an error. Errors mean no
    /// challenge is selected or the backend refused the statevector.
    pub fn check_solution(
        &self,
        circuit: &Circuit,
        backend: &dyn Backend,
    ) -> AppResult<ChallengeOutcome> {
        let challenge = self
            .current()
            .ok_or_else(|| AppError::Challenge("No challenge selected.".into()))?;

        if circuit.num_qubits() != challenge.num_qubits {
            return Ok(ChallengeOutcome {
                passed: false,
                fidelity: None,
                message: format!(
                    "Incorrect qubit count. Expected {}.",
                    challenge.num_qubits
                ),
            });
        }

        let user = backend.run_statevector(&translate(circuit))?;
        let target = backend.run_statevector(&translate(&challenge.target))?;
        let fidelity = user.fidelity(&target).ok_or_else(|| {
            AppError::Challenge("Statevector sizes differ".into())
        })?;

        let passed = fidelity > FIDELITY_THRESHOLD;
        info!(key = challenge.key, fidelity, passed, "challenge checked");
        let message = if passed {
            format!("Success! Fidelity: {fidelity:.4}")
        } else {
            format!("Incorrect state. Fidelity: {fidelity:.4}")
        };
        Ok(ChallengeOutcome {
            passed,
            fidelity: Some(fidelity),
            message,
        })
    }
}
