//! Property tests for circuit translation.

use proptest::prelude::*;
use qlab_hal::{translate, translate_for_diagram};
use qlab_ir::{Circuit, Gate, QubitId};

fn gate(num_qubits: u32) -> impl Strategy<Value = Gate> {
    let q = (0..num_qubits).prop_map(QubitId);
    let pair = (0..num_qubits, 0..num_qubits)
        .prop_filter("distinct", |(a, b)| a != b)
        .prop_map(|(a, b)| (QubitId(a), QubitId(b)));
    prop_oneof![
        q.clone().prop_map(|target| Gate::H { target }),
        q.clone().prop_map(|target| Gate::T { target }),
        (q.clone(), -6.3f64..6.3).prop_map(|(target, theta)| Gate::Rx { target, theta }),
        (q, -6.3f64..6.3).prop_map(|(target, theta)| Gate::Rz { target, theta }),
        pair.clone().prop_map(|(control, target)| Gate::Cnot { control, target }),
        pair.prop_map(|(q1, q2)| Gate::Swap { q1, q2 }),
    ]
}

fn circuit_strategy() -> impl Strategy<Value = Circuit> {
    (2u32..6).prop_flat_map(|n| {
        (
            prop::collection::vec(gate(n), 0..20),
            prop::collection::vec(0..n, 0..4),
        )
            .prop_map(move |(gates, measured)| {
                let mut circuit = Circuit::new(n).unwrap();
                for g in gates {
                    circuit.append(g).unwrap();
                }
                circuit.measure(&measured).unwrap();
                circuit
            })
    })
}

proptest! {
    #[test]
    fn translation_is_a_pure_function(circuit in circuit_strategy()) {
        prop_assert_eq!(translate(&circuit), translate(&circuit.clone()));
    }

    #[test]
    fn one_instruction_per_gate_and_measurement(circuit in circuit_strategy()) {
        let program = translate(&circuit);
        prop_assert_eq!(program.num_qubits(), circuit.num_qubits());
        prop_assert_eq!(program.gate_count(), circuit.num_gates());
        prop_assert_eq!(program.measurement_count(), circuit.measurements().len());
        prop_assert_eq!(program.num_clbits() as usize, circuit.measurements().len());
    }

    #[test]
    fn diagram_form_matches_gates(circuit in circuit_strategy()) {
        let full = translate(&circuit);
        let diagram = translate_for_diagram(&circuit);
        prop_assert_eq!(full.gate_count(), diagram.gate_count());
        if circuit.measurements().is_empty() {
            prop_assert_eq!(diagram.num_clbits(), 0);
        } else {
            prop_assert_eq!(diagram, full);
        }
    }
}
