//! Property tests for the simulator's sampling and amplitude paths.

use proptest::prelude::*;
use qlab_adapter_sim::SimulatorBackend;
use qlab_hal::{Backend, translate};
use qlab_ir::Circuit;

#[derive(Debug, Clone)]
enum Step {
    H(u32),
    X(u32),
    Ry(u32, f64),
    Rz(u32, f64),
    Cx(u32, u32),
    Swap(u32, u32),
}

fn step(num_qubits: u32) -> impl Strategy<Value = Step> {
    let q = 0..num_qubits;
    let pair = (0..num_qubits, 0..num_qubits).prop_filter("distinct", |(a, b)| a != b);
    prop_oneof![
        q.clone().prop_map(Step::H),
        q.clone().prop_map(Step::X),
        (q.clone(), -3.2f64..3.2).prop_map(|(q, t)| Step::Ry(q, t)),
        (q, -3.2f64..3.2).prop_map(|(q, t)| Step::Rz(q, t)),
        pair.clone().prop_map(|(a, b)| Step::Cx(a, b)),
        pair.prop_map(|(a, b)| Step::Swap(a, b)),
    ]
}

fn build(num_qubits: u32, steps: &[Step]) -> Circuit {
    let mut circuit = Circuit::new(num_qubits).unwrap();
    for s in steps {
        match *s {
            Step::H(q) => circuit.h(q).unwrap(),
            Step::X(q) => circuit.x(q).unwrap(),
            Step::Ry(q, t) => circuit.ry(q, t).unwrap(),
            Step::Rz(q, t) => circuit.rz(q, t).unwrap(),
            Step::Cx(a, b) => circuit.cx(a, b).unwrap(),
            Step::Swap(a, b) => circuit.swap(a, b).unwrap(),
        };
    }
    circuit
}

fn circuit_strategy() -> impl Strategy<Value = Circuit> {
    (2u32..5).prop_flat_map(|n| {
        prop::collection::vec(step(n), 0..12).prop_map(move |steps| build(n, &steps))
    })
}

proptest! {
    #[test]
    fn counts_sum_to_shots(mut circuit in circuit_strategy(), shots in 1u32..600) {
        circuit.measure_all();
        let backend = SimulatorBackend::new().with_seed(3);
        let result = backend.run(&translate(&circuit), shots).unwrap();

        prop_assert_eq!(result.counts.total(), u64::from(shots));
        let width = circuit.num_qubits() as usize;
        for (bits, _) in result.counts.iter() {
            prop_assert_eq!(bits.len(), width);
        }
    }

    #[test]
    fn statevector_is_normalized(circuit in circuit_strategy()) {
        let sv = SimulatorBackend::new().run_statevector(&translate(&circuit)).unwrap();
        let norm: f64 = sv.probabilities().iter().sum();
        prop_assert!((norm - 1.0).abs() < 1e-9);
        prop_assert_eq!(sv.amplitudes().len(), 1usize << circuit.num_qubits());
    }

    #[test]
    fn measurements_do_not_change_amplitudes(circuit in circuit_strategy()) {
        let backend = SimulatorBackend::new();
        let coherent = backend.run_statevector(&translate(&circuit)).unwrap();

        let mut measured = circuit.clone();
        measured.measure_all();
        let stripped = backend.run_statevector(&translate(&measured)).unwrap();
        prop_assert_eq!(coherent, stripped);
    }
}
