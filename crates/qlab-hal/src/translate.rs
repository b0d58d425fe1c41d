//! Translation from logical circuits to native programs.
//!
//! Translation is a pure function of the circuit: the same circuit always
//! produces a structurally identical [`Program`]. Each gate kind maps to
//! exactly one native operation.

use qlab_ir::{Circuit, ClbitId, Gate};
use tracing::trace;

use crate::program::{Instruction, Operation, Program};

/// Translate a circuit into an executable program.
///
/// The program has one quantum register per qubit and one classical register
/// per measurement entry; measurement `i` writes classical bit `i` from
/// qubit `measurements[i]`.
pub fn translate(circuit: &Circuit) -> Program {
    let num_clbits = u32::try_from(circuit.measurements().len()).unwrap_or(u32::MAX);
    let mut program = Program::new(circuit.num_qubits(), num_clbits);
    emit_gates(circuit, &mut program);
    for (i, &qubit) in circuit.measurements().iter().enumerate() {
        program.push(Instruction::measure(qubit, ClbitId(i as u32)));
    }
    trace!(
        gates = program.gate_count(),
        measurements = program.measurement_count(),
        "translated circuit"
    );
    program
}

/// Translate a circuit for structural display only.
///
/// Gate emission is identical to [`translate`]. When the circuit has no
/// measurements the classical register is left out entirely, so the diagram
/// shows the coherent circuit without forcing a collapse.
pub fn translate_for_diagram(circuit: &Circuit) -> Program {
    if circuit.is_measured() {
        return translate(circuit);
    }
    let mut program = Program::new(circuit.num_qubits(), 0);
    emit_gates(circuit, &mut program);
    program
}

fn emit_gates(circuit: &Circuit, program: &mut Program) {
    for gate in circuit.gates() {
        program.push(native_instruction(gate));
    }
}

/// The native instruction for one gate.
pub fn native_instruction(gate: &Gate) -> Instruction {
    let op = match *gate {
        Gate::H { .. } => Operation::H,
        Gate::X { .. } => Operation::X,
        Gate::Y { .. } => Operation::Y,
        Gate::Z { .. } => Operation::Z,
        Gate::S { .. } => Operation::S,
        Gate::T { .. } => Operation::T,
        Gate::Rx { theta, .. } => Operation::Rx(theta),
        Gate::Ry { theta, .. } => Operation::Ry(theta),
        Gate::Rz { theta, .. } => Operation::Rz(theta),
        Gate::Cnot { .. } => Operation::Cx,
        Gate::Swap { .. } => Operation::Swap,
    };
    Instruction::gate(op, gate.targets())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qlab_ir::QubitId;
    use std::f64::consts::PI;

    #[test]
    fn test_full_translation() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.h(0).unwrap().cx(0, 1).unwrap().measure_all();

        let program = translate(&circuit);
        assert_eq!(program.num_qubits(), 2);
        assert_eq!(program.num_clbits(), 2);

        let insts = program.instructions();
        assert_eq!(insts.len(), 4);
        assert_eq!(insts[0].op, Operation::H);
        assert_eq!(insts[1].op, Operation::Cx);
        assert_eq!(insts[1].qubits, vec![QubitId(0), QubitId(1)]);
        assert_eq!(insts[3].qubits, vec![QubitId(1)]);
        assert_eq!(insts[3].clbits, vec![ClbitId(1)]);
    }

    #[test]
    fn test_every_gate_kind_maps_one_to_one() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit
            .h(0)
            .unwrap()
            .x(0)
            .unwrap()
            .y(0)
            .unwrap()
            .z(0)
            .unwrap()
            .t(0)
            .unwrap()
            .s(0)
            .unwrap()
            .rx(1, PI)
            .unwrap()
            .ry(1, PI / 2.0)
            .unwrap()
            .rz(1, PI / 4.0)
            .unwrap()
            .cx(1, 0)
            .unwrap()
            .swap(0, 1)
            .unwrap();

        let ops: Vec<_> = translate(&circuit)
            .instructions()
            .iter()
            .map(|inst| inst.op)
            .collect();
        assert_eq!(
            ops,
            vec![
                Operation::H,
                Operation::X,
                Operation::Y,
                Operation::Z,
                Operation::T,
                Operation::S,
                Operation::Rx(PI),
                Operation::Ry(PI / 2.0),
                Operation::Rz(PI / 4.0),
                Operation::Cx,
                Operation::Swap,
            ]
        );
    }

    #[test]
    fn test_measurement_order_and_duplicates() {
        let mut circuit = Circuit::new(3).unwrap();
        circuit.x(2).unwrap().measure(&[2, 0, 2]).unwrap();

        let program = translate(&circuit);
        assert_eq!(program.num_clbits(), 3);
        let measures: Vec<_> = program
            .instructions()
            .iter()
            .filter(|inst| inst.op.is_measure())
            .map(|inst| (inst.qubits[0], inst.clbits[0]))
            .collect();
        assert_eq!(
            measures,
            vec![
                (QubitId(2), ClbitId(0)),
                (QubitId(0), ClbitId(1)),
                (QubitId(2), ClbitId(2)),
            ]
        );
    }

    #[test]
    fn test_diagram_translation_without_measurements() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.h(0).unwrap().cx(0, 1).unwrap();

        let program = translate_for_diagram(&circuit);
        assert_eq!(program.num_clbits(), 0);
        assert_eq!(program.measurement_count(), 0);
        assert_eq!(program.gate_count(), 2);
    }

    #[test]
    fn test_diagram_translation_with_measurements_matches_full() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.h(0).unwrap().measure(&[0]).unwrap();
        assert_eq!(translate_for_diagram(&circuit), translate(&circuit));
    }

    #[test]
    fn test_translation_is_deterministic() {
        let mut circuit = Circuit::new(3).unwrap();
        circuit
            .h(0)
            .unwrap()
            .ry(1, 0.3)
            .unwrap()
            .cx(0, 2)
            .unwrap()
            .measure_all();
        assert_eq!(translate(&circuit), translate(&circuit));
    }
}
