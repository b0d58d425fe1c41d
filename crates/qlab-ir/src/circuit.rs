//! Logical circuit builder.

use serde::Serialize;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::QubitId;

/// Default upper bound on the register size of a circuit.
pub const DEFAULT_MAX_QUBITS: u32 = 16;

/// A backend-agnostic quantum circuit.
///
/// The register size is fixed at construction. Gates are appended in order
/// and insertion order is execution order; nothing is ever removed or
/// rewritten in place. Measurements, if any, happen after every gate, in the
/// order listed, and each produces one classical output bit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    /// Number of qubits in the register.
    num_qubits: u32,
    /// Gate sequence.
    gates: Vec<Gate>,
    /// Qubits to sample, one classical bit each.
    measurements: Vec<QubitId>,
}

impl Circuit {
    /// Create an empty circuit, bounded by [`DEFAULT_MAX_QUBITS`].
    pub fn new(num_qubits: u32) -> IrResult<Self> {
        Self::with_max_qubits(num_qubits, DEFAULT_MAX_QUBITS)
    }

    /// Create an empty circuit with a caller-supplied register limit.
    pub fn with_max_qubits(num_qubits: u32, max_qubits: u32) -> IrResult<Self> {
        if num_qubits == 0 || num_qubits > max_qubits {
            return Err(IrError::InvalidQubitCount {
                count: num_qubits,
                max: max_qubits,
            });
        }
        Ok(Self {
            num_qubits,
            gates: Vec::new(),
            measurements: Vec::new(),
        })
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.append(Gate::H {
            target: QubitId(qubit),
        })
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.append(Gate::X {
            target: QubitId(qubit),
        })
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.append(Gate::Y {
            target: QubitId(qubit),
        })
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.append(Gate::Z {
            target: QubitId(qubit),
        })
    }

    /// Apply S (phase) gate.
    pub fn s(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.append(Gate::S {
            target: QubitId(qubit),
        })
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: u32) -> IrResult<&mut Self> {
        self.append(Gate::T {
            target: QubitId(qubit),
        })
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, qubit: u32, theta: f64) -> IrResult<&mut Self> {
        self.append(Gate::Rx {
            target: QubitId(qubit),
            theta,
        })
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, qubit: u32, theta: f64) -> IrResult<&mut Self> {
        self.append(Gate::Ry {
            target: QubitId(qubit),
            theta,
        })
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, qubit: u32, theta: f64) -> IrResult<&mut Self> {
        self.append(Gate::Rz {
            target: QubitId(qubit),
            theta,
        })
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: u32, target: u32) -> IrResult<&mut Self> {
        self.append(Gate::Cnot {
            control: QubitId(control),
            target: QubitId(target),
        })
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: u32, q2: u32) -> IrResult<&mut Self> {
        self.append(Gate::Swap {
            q1: QubitId(q1),
            q2: QubitId(q2),
        })
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Append an already-built gate.
    ///
    /// Every target must lie in the register and a two-qubit gate must name
    /// two distinct qubits. On error the circuit is left unchanged.
    pub fn append(&mut self, gate: Gate) -> IrResult<&mut Self> {
        let targets = gate.targets();
        for &qubit in &targets {
            self.check_qubit(qubit, Some(gate.name()))?;
        }
        if let [a, b] = targets.as_slice() {
            if a == b {
                return Err(IrError::DuplicateQubit {
                    qubit: *a,
                    gate: Some(gate.name()),
                });
            }
        }
        self.gates.push(gate);
        Ok(self)
    }

    /// Measure every qubit, in ascending order.
    ///
    /// Replaces any measurement list set earlier.
    pub fn measure_all(&mut self) -> &mut Self {
        self.measurements = self.qubits().collect();
        self
    }

    /// Append qubits to the measurement list.
    ///
    /// Repeated indices are kept; each entry yields its own output bit.
    pub fn measure(&mut self, qubits: &[u32]) -> IrResult<&mut Self> {
        for &q in qubits {
            self.check_qubit(QubitId(q), None)?;
        }
        self.measurements.extend(qubits.iter().copied().map(QubitId));
        Ok(self)
    }

    fn check_qubit(&self, qubit: QubitId, gate: Option<&'static str>) -> IrResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
                gate,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Iterate over the register in index order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        (0..self.num_qubits).map(QubitId)
    }

    /// Get the gate sequence.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get the number of gates.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Get the measurement list.
    pub fn measurements(&self) -> &[QubitId] {
        &self.measurements
    }

    /// Check whether any measurement is scheduled.
    pub fn is_measured(&self) -> bool {
        !self.measurements.is_empty()
    }

    /// Take an independent snapshot of the first `len` gates.
    ///
    /// The snapshot has the same register size and no measurements. It owns
    /// its gate list, so later appends to `self` never show up in it.
    pub fn prefix(&self, len: usize) -> IrResult<Circuit> {
        if len > self.gates.len() {
            return Err(IrError::InvalidPrefix {
                requested: len,
                available: self.gates.len(),
            });
        }
        Ok(Circuit {
            num_qubits: self.num_qubits,
            gates: self.gates[..len].to_vec(),
            measurements: Vec::new(),
        })
    }
}

impl std::fmt::Display for Circuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Circuit(qubits={}, gates={})",
            self.num_qubits,
            self.gates.len()
        )
    }
}
