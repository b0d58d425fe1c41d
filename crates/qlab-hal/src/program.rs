//! Native program representation executed by backends.
//!
//! A [`Program`] is the engine-level form of a circuit: explicit quantum and
//! classical register sizes and a flat instruction list in which measurement
//! is just another instruction writing a classical bit.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use qlab_ir::{ClbitId, QubitId};

/// A native operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Hadamard.
    H,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// S (phase pi/2).
    S,
    /// T (phase pi/4).
    T,
    /// X rotation, angle in radians.
    Rx(f64),
    /// Y rotation, angle in radians.
    Ry(f64),
    /// Z rotation, angle in radians.
    Rz(f64),
    /// Controlled-X, operands `[control, target]`.
    Cx,
    /// SWAP.
    Swap,
    /// Computational-basis measurement into a classical bit.
    Measure,
}

impl Operation {
    /// OpenQASM 3 name of the operation.
    pub fn qasm_name(&self) -> &'static str {
        match self {
            Operation::H => "h",
            Operation::X => "x",
            Operation::Y => "y",
            Operation::Z => "z",
            Operation::S => "s",
            Operation::T => "t",
            Operation::Rx(_) => "rx",
            Operation::Ry(_) => "ry",
            Operation::Rz(_) => "rz",
            Operation::Cx => "cx",
            Operation::Swap => "swap",
            Operation::Measure => "measure",
        }
    }

    /// Number of qubit operands.
    pub fn num_qubits(&self) -> usize {
        match self {
            Operation::Cx | Operation::Swap => 2,
            _ => 1,
        }
    }

    /// Angle of a rotation, if any.
    pub fn angle(&self) -> Option<f64> {
        match *self {
            Operation::Rx(theta) | Operation::Ry(theta) | Operation::Rz(theta) => Some(theta),
            _ => None,
        }
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self, Operation::Measure)
    }

    fn diagram_label(&self) -> String {
        match self {
            Operation::Rx(t) => format!("RX({t:.2})"),
            Operation::Ry(t) => format!("RY({t:.2})"),
            Operation::Rz(t) => format!("RZ({t:.2})"),
            other => other.qasm_name().to_ascii_uppercase(),
        }
    }
}

/// An operation bound to its operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The operation.
    pub op: Operation,
    /// Qubit operands.
    pub qubits: Vec<QubitId>,
    /// Classical operands (measurement target).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(op: Operation, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            op,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a measurement of `qubit` into `clbit`.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            op: Operation::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }
}

/// A program in the engine's native form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    num_qubits: u32,
    num_clbits: u32,
    instructions: Vec<Instruction>,
}

impl Program {
    /// Create an empty program with the given register sizes.
    pub fn new(num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            num_qubits,
            num_clbits,
            instructions: Vec::new(),
        }
    }

    /// Append an instruction.
    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Number of quantum registers.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of classical registers.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Instructions in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of non-measurement instructions.
    pub fn gate_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|inst| !inst.op.is_measure())
            .count()
    }

    /// Number of measurement instructions.
    pub fn measurement_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|inst| inst.op.is_measure())
            .count()
    }

    /// Copy of this program with every measurement and the classical
    /// register removed.
    pub fn without_measurements(&self) -> Program {
        Program {
            num_qubits: self.num_qubits,
            num_clbits: 0,
            instructions: self
                .instructions
                .iter()
                .filter(|inst| !inst.op.is_measure())
                .cloned()
                .collect(),
        }
    }

    /// Emit the program as OpenQASM 3 source.
    pub fn to_qasm(&self) -> String {
        let mut out = String::new();
        out.push_str("OPENQASM 3.0;\n");
        out.push_str("include \"stdgates.inc\";\n\n");
        let _ = writeln!(out, "qubit[{}] q;", self.num_qubits);
        if self.num_clbits > 0 {
            let _ = writeln!(out, "bit[{}] c;", self.num_clbits);
        }
        out.push('\n');

        for inst in &self.instructions {
            let qubits = inst
                .qubits
                .iter()
                .map(|q| format!("q[{}]", q.0))
                .collect::<Vec<_>>()
                .join(", ");
            match inst.op {
                Operation::Measure => {
                    let _ = writeln!(out, "c[{}] = measure {qubits};", inst.clbits[0].0);
                }
                op => match op.angle() {
                    Some(theta) => {
                        let _ = writeln!(out, "{}({theta}) {qubits};", op.qasm_name());
                    }
                    None => {
                        let _ = writeln!(out, "{} {qubits};", op.qasm_name());
                    }
                },
            }
        }
        out
    }

    /// Render an ASCII diagram, one wire per qubit and one column per
    /// instruction.
    pub fn draw(&self) -> String {
        let n = self.num_qubits as usize;
        let name_width = format!("q{}", n.saturating_sub(1)).len();
        let mut wires: Vec<String> = (0..n)
            .map(|q| format!("{:>name_width$}: ", format!("q{q}")))
            .collect();

        for inst in &self.instructions {
            let labels = column_labels(inst, n);
            let width = labels
                .iter()
                .flatten()
                .map(|l| l.chars().count())
                .max()
                .unwrap_or(1);

            for (wire, label) in wires.iter_mut().zip(&labels) {
                wire.push('─');
                match label {
                    Some(label) => {
                        let pad = width - label.chars().count();
                        let left = pad / 2;
                        wire.push_str(&"─".repeat(left));
                        wire.push_str(label);
                        wire.push_str(&"─".repeat(pad - left));
                    }
                    None => wire.push_str(&"─".repeat(width)),
                }
                wire.push('─');
            }
        }

        let mut out = String::new();
        for wire in wires {
            out.push_str(&wire);
            out.push_str("─\n");
        }
        out
    }
}

/// Per-wire labels for one diagram column.
fn column_labels(inst: &Instruction, num_wires: usize) -> Vec<Option<String>> {
    let mut labels = vec![None; num_wires];
    let mut set = |q: QubitId, label: String| {
        if let Some(slot) = labels.get_mut(q.index()) {
            *slot = Some(label);
        }
    };

    match (inst.op, inst.qubits.as_slice()) {
        (Operation::Measure, [q]) => {
            let bit = inst.clbits.first().map_or(0, |c| c.0);
            set(*q, format!("M{bit}"));
        }
        (Operation::Cx, [control, target]) => {
            set(*control, "■".into());
            set(*target, "X".into());
        }
        (Operation::Swap, [a, b]) => {
            set(*a, "x".into());
            set(*b, "x".into());
        }
        (op, qubits) => {
            for q in qubits {
                set(*q, op.diagram_label());
            }
        }
    }

    // Vertical connector across wires spanned by a two-qubit gate.
    if let [a, b] = inst.qubits.as_slice() {
        let (lo, hi) = if a.0 < b.0 { (a.index(), b.index()) } else { (b.index(), a.index()) };
        for slot in labels.iter_mut().take(hi.min(num_wires)).skip(lo + 1) {
            if slot.is_none() {
                *slot = Some("│".into());
            }
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bell_program() -> Program {
        let mut program = Program::new(2, 2);
        program.push(Instruction::gate(Operation::H, [QubitId(0)]));
        program.push(Instruction::gate(Operation::Cx, [QubitId(0), QubitId(1)]));
        program.push(Instruction::measure(QubitId(0), ClbitId(0)));
        program.push(Instruction::measure(QubitId(1), ClbitId(1)));
        program
    }

    #[test]
    fn test_counts() {
        let program = bell_program();
        assert_eq!(program.gate_count(), 2);
        assert_eq!(program.measurement_count(), 2);
    }

    #[test]
    fn test_without_measurements() {
        let stripped = bell_program().without_measurements();
        assert_eq!(stripped.num_qubits(), 2);
        assert_eq!(stripped.num_clbits(), 0);
        assert_eq!(stripped.measurement_count(), 0);
        assert_eq!(stripped.gate_count(), 2);
    }

    #[test]
    fn test_qasm_output() {
        let mut program = bell_program();
        program.push(Instruction::gate(Operation::Rz(0.5), [QubitId(1)]));
        let qasm = program.to_qasm();
        assert!(qasm.starts_with("OPENQASM 3.0;"));
        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("bit[2] c;"));
        assert!(qasm.contains("h q[0];"));
        assert!(qasm.contains("cx q[0], q[1];"));
        assert!(qasm.contains("c[1] = measure q[1];"));
        assert!(qasm.contains("rz(0.5) q[1];"));
    }

    #[test]
    fn test_draw_has_one_line_per_qubit() {
        let drawing = bell_program().draw();
        let lines: Vec<_> = drawing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("q0: "));
        assert!(lines[0].contains('H'));
        assert!(lines[0].contains('■'));
        assert!(lines[0].contains("M0"));
        assert!(lines[1].contains('X'));
        assert!(lines[1].contains("M1"));
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
    }

    #[test]
    fn test_draw_connector_between_distant_qubits() {
        let mut program = Program::new(3, 0);
        program.push(Instruction::gate(Operation::Swap, [QubitId(2), QubitId(0)]));
        let drawing = program.draw();
        let lines: Vec<_> = drawing.lines().collect();
        assert!(lines[1].contains('│'));
        assert!(lines[0].contains('x'));
        assert!(lines[2].contains('x'));
    }
}
