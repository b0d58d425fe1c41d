//! Quantum gate types.
//!
//! A [`Gate`] is a pure syntax node: it names an operation and the qubits it
//! acts on, and never performs any numeric work itself. Backends decide what
//! a gate means numerically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;
use crate::qubit::QubitId;

/// Tag identifying the kind of a gate, without its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S (phase) gate, sqrt(Z).
    S,
    /// T gate, fourth root of Z.
    T,
    /// Rotation around the X axis.
    Rx,
    /// Rotation around the Y axis.
    Ry,
    /// Rotation around the Z axis.
    Rz,
    /// Controlled-NOT gate.
    Cnot,
    /// SWAP gate.
    Swap,
}

impl GateKind {
    /// Every gate kind, in declaration order.
    pub const ALL: [GateKind; 11] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::S,
        GateKind::T,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
        GateKind::Cnot,
        GateKind::Swap,
    ];

    /// Get the display name of this gate kind.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::S => "S",
            GateKind::T => "T",
            GateKind::Rx => "RX",
            GateKind::Ry => "RY",
            GateKind::Rz => "RZ",
            GateKind::Cnot => "CNOT",
            GateKind::Swap => "SWAP",
        }
    }

    /// Get the number of qubits a gate of this kind acts on.
    #[inline]
    pub fn num_qubits(self) -> usize {
        match self {
            GateKind::Cnot | GateKind::Swap => 2,
            _ => 1,
        }
    }

    /// Check if this kind carries a rotation angle.
    #[inline]
    pub fn is_rotation(self) -> bool {
        matches!(self, GateKind::Rx | GateKind::Ry | GateKind::Rz)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "H" => Ok(GateKind::H),
            "X" => Ok(GateKind::X),
            "Y" => Ok(GateKind::Y),
            "Z" => Ok(GateKind::Z),
            "S" | "PHASE" => Ok(GateKind::S),
            "T" => Ok(GateKind::T),
            "RX" => Ok(GateKind::Rx),
            "RY" => Ok(GateKind::Ry),
            "RZ" => Ok(GateKind::Rz),
            "CNOT" | "CX" => Ok(GateKind::Cnot),
            "SWAP" => Ok(GateKind::Swap),
            _ => Err(IrError::UnknownGate(s.to_string())),
        }
    }
}

/// A gate applied to concrete qubits.
///
/// Each variant carries exactly the operands its kind needs. Equality is by
/// kind, targets and (for rotations) angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gate {
    /// Hadamard gate.
    H {
        /// Target qubit.
        target: QubitId,
    },
    /// Pauli-X gate.
    X {
        /// Target qubit.
        target: QubitId,
    },
    /// Pauli-Y gate.
    Y {
        /// Target qubit.
        target: QubitId,
    },
    /// Pauli-Z gate.
    Z {
        /// Target qubit.
        target: QubitId,
    },
    /// S (phase) gate.
    S {
        /// Target qubit.
        target: QubitId,
    },
    /// T gate.
    T {
        /// Target qubit.
        target: QubitId,
    },
    /// X rotation by `theta` radians.
    Rx {
        /// Target qubit.
        target: QubitId,
        /// Rotation angle in radians.
        theta: f64,
    },
    /// Y rotation by `theta` radians.
    Ry {
        /// Target qubit.
        target: QubitId,
        /// Rotation angle in radians.
        theta: f64,
    },
    /// Z rotation by `theta` radians.
    Rz {
        /// Target qubit.
        target: QubitId,
        /// Rotation angle in radians.
        theta: f64,
    },
    /// Controlled-NOT.
    Cnot {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
    /// SWAP of two qubits.
    Swap {
        /// First qubit.
        q1: QubitId,
        /// Second qubit.
        q2: QubitId,
    },
}

impl Gate {
    /// Get the kind tag of this gate.
    pub fn kind(&self) -> GateKind {
        match self {
            Gate::H { .. } => GateKind::H,
            Gate::X { .. } => GateKind::X,
            Gate::Y { .. } => GateKind::Y,
            Gate::Z { .. } => GateKind::Z,
            Gate::S { .. } => GateKind::S,
            Gate::T { .. } => GateKind::T,
            Gate::Rx { .. } => GateKind::Rx,
            Gate::Ry { .. } => GateKind::Ry,
            Gate::Rz { .. } => GateKind::Rz,
            Gate::Cnot { .. } => GateKind::Cnot,
            Gate::Swap { .. } => GateKind::Swap,
        }
    }

    /// Get the display name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Get the qubits this gate acts on, in operand order.
    ///
    /// For `Cnot` this is `[control, target]`.
    pub fn targets(&self) -> Vec<QubitId> {
        match *self {
            Gate::H { target }
            | Gate::X { target }
            | Gate::Y { target }
            | Gate::Z { target }
            | Gate::S { target }
            | Gate::T { target }
            | Gate::Rx { target, .. }
            | Gate::Ry { target, .. }
            | Gate::Rz { target, .. } => vec![target],
            Gate::Cnot { control, target } => vec![control, target],
            Gate::Swap { q1, q2 } => vec![q1, q2],
        }
    }

    /// Get the rotation angle, if this is a rotation gate.
    pub fn theta(&self) -> Option<f64> {
        match *self {
            Gate::Rx { theta, .. } | Gate::Ry { theta, .. } | Gate::Rz { theta, .. } => {
                Some(theta)
            }
            _ => None,
        }
    }

    /// Check whether the gate touches `qubit`.
    pub fn acts_on(&self, qubit: QubitId) -> bool {
        self.targets().contains(&qubit)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets = self
            .targets()
            .iter()
            .map(|q| q.0.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        match self.theta() {
            Some(theta) => write!(f, "{}({targets}, theta={theta:.2})", self.name()),
            None => write!(f, "{}({targets})", self.name()),
        }
    }
}
