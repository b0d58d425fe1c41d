//! Precondition checks run before the controller mutates a circuit.

use qlab_ir::{Gate, GateKind, IrError, QubitId};

use crate::error::{AppError, AppResult};

/// Checks qubit counts and gate requests against the configured limits.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    max_qubits: u32,
}

impl Validator {
    /// Create a validator allowing registers of up to `max_qubits`.
    pub fn new(max_qubits: u32) -> Self {
        Self { max_qubits }
    }

    /// The register limit.
    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    /// Qubit count must be positive and within the limit.
    pub fn validate_qubit_count(&self, count: u32) -> AppResult<()> {
        if count == 0 {
            return Err(AppError::Validation("Qubit count must be positive.".into()));
        }
        if count > self.max_qubits {
            return Err(AppError::Validation(format!(
                "Qubit count {count} exceeds the limit of {}.",
                self.max_qubits
            )));
        }
        Ok(())
    }

    /// Every index must address the register.
    pub fn validate_gate_targets(&self, qubits: &[u32], num_qubits: u32) -> AppResult<()> {
        match qubits.iter().find(|&&q| q >= num_qubits) {
            Some(&q) => Err(AppError::Index(IrError::QubitOutOfRange {
                qubit: QubitId(q),
                num_qubits,
                gate: None,
            })),
            None => Ok(()),
        }
    }

    /// Check a gate request and build the gate it describes.
    ///
    /// Rotations need a finite angle; other kinds must not carry one.
    pub fn validate_gate_request(
        &self,
        kind: GateKind,
        qubits: &[u32],
        theta: Option<f64>,
        num_qubits: u32,
    ) -> AppResult<Gate> {
        if qubits.len() != kind.num_qubits() {
            return Err(AppError::Validation(format!(
                "{kind} takes {} qubit(s), got {}",
                kind.num_qubits(),
                qubits.len()
            )));
        }
        match (kind.is_rotation(), theta) {
            (true, None) => {
                return Err(AppError::Validation(format!("{kind} needs an angle")));
            }
            (true, Some(t)) if !t.is_finite() => {
                return Err(AppError::Validation(format!("{kind} angle must be finite")));
            }
            (false, Some(_)) => {
                return Err(AppError::Validation(format!("{kind} takes no angle")));
            }
            _ => {}
        }
        self.validate_gate_targets(qubits, num_qubits)
            .map_err(|err| match err {
                AppError::Index(IrError::QubitOutOfRange { qubit, num_qubits, .. }) => {
                    AppError::Index(IrError::QubitOutOfRange {
                        qubit,
                        num_qubits,
                        gate: Some(kind.name()),
                    })
                }
                other => other,
            })?;

        let q = |i: usize| QubitId(qubits[i]);
        let theta = theta.unwrap_or_default();
        Ok(match kind {
            GateKind::H => Gate::H { target: q(0) },
            GateKind::X => Gate::X { target: q(0) },
            GateKind::Y => Gate::Y { target: q(0) },
            GateKind::Z => Gate::Z { target: q(0) },
            GateKind::S => Gate::S { target: q(0) },
            GateKind::T => Gate::T { target: q(0) },
            GateKind::Rx => Gate::Rx { target: q(0), theta },
            GateKind::Ry => Gate::Ry { target: q(0), theta },
            GateKind::Rz => Gate::Rz { target: q(0), theta },
            GateKind::Cnot => Gate::Cnot {
                control: q(0),
                target: q(1),
            },
            GateKind::Swap => Gate::Swap { q1: q(0), q2: q(1) },
        })
    }
}
