//! Canonical circuits.
//!
//! Each builder returns a fresh circuit with a fixed gate sequence. The
//! controller installs them as its current circuit; tests use them as
//! fixtures.

use std::f64::consts::PI;

use qlab_ir::{Circuit, IrResult};

/// Bell state (|00> + |11>)/sqrt(2): `[H(0), CNOT(0, 1)]`.
pub fn bell(max_qubits: u32) -> IrResult<Circuit> {
    let mut circuit = Circuit::with_max_qubits(2, max_qubits)?;
    circuit.h(0)?.cx(0, 1)?;
    Ok(circuit)
}

/// GHZ state over `n` qubits: `H(0)` then `CNOT(i, i + 1)` down the chain.
pub fn ghz(n: u32, max_qubits: u32) -> IrResult<Circuit> {
    let mut circuit = Circuit::with_max_qubits(n, max_qubits)?;
    circuit.h(0)?;
    for i in 0..n - 1 {
        circuit.cx(i, i + 1)?;
    }
    Ok(circuit)
}

/// Coherent teleportation of qubit 0 onto qubit 2.
///
/// Bell pair on (1, 2), Bell-basis rotation on (0, 1), then the corrections
/// as controlled gates: CNOT(1, 2) and a CZ(0, 2) written as H-CNOT-H on the
/// target. No mid-circuit measurement is involved.
pub fn teleportation(max_qubits: u32) -> IrResult<Circuit> {
    let mut circuit = Circuit::with_max_qubits(3, max_qubits)?;
    circuit
        .h(1)?
        .cx(1, 2)?
        .cx(0, 1)?
        .h(0)?
        .cx(1, 2)?
        .h(2)?
        .cx(0, 2)?
        .h(2)?;
    Ok(circuit)
}

/// Min-max normalize `values` into `[0, pi]`.
///
/// A constant series maps every value to pi/2.
pub fn normalize_to_angles(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == min {
        return vec![PI / 2.0; values.len()];
    }
    values.iter().map(|v| (v - min) / (max - min) * PI).collect()
}

/// Angle-encode `values`, one qubit per value, as `RY(angle)`.
///
/// With `correlated` set, neighbouring qubits are chained with
/// `CNOT(i, i + 1)` after the rotations.
pub fn angle_encoded(values: &[f64], correlated: bool, max_qubits: u32) -> IrResult<Circuit> {
    let n = u32::try_from(values.len()).unwrap_or(u32::MAX);
    let mut circuit = Circuit::with_max_qubits(n, max_qubits)?;
    for (q, angle) in (0..n).zip(normalize_to_angles(values)) {
        circuit.ry(q, angle)?;
    }
    if correlated {
        for q in 0..n - 1 {
            circuit.cx(q, q + 1)?;
        }
    }
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qlab_ir::{Gate, GateKind, IrError, QubitId};

    #[test]
    fn test_bell_sequence() {
        let circuit = bell(16).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(
            circuit.gates(),
            &[
                Gate::H { target: QubitId(0) },
                Gate::Cnot {
                    control: QubitId(0),
                    target: QubitId(1)
                },
            ]
        );
        assert!(!circuit.is_measured());
    }

    #[test]
    fn test_ghz_sequence() {
        let circuit = ghz(3, 16).unwrap();
        let shown: Vec<String> = circuit.gates().iter().map(ToString::to_string).collect();
        assert_eq!(shown, vec!["H(0)", "CNOT(0, 1)", "CNOT(1, 2)"]);
    }

    #[test]
    fn test_ghz_single_qubit() {
        let circuit = ghz(1, 16).unwrap();
        assert_eq!(circuit.num_gates(), 1);
    }

    #[test]
    fn test_ghz_bounds() {
        assert!(matches!(ghz(0, 16), Err(IrError::InvalidQubitCount { .. })));
        assert!(matches!(ghz(17, 16), Err(IrError::InvalidQubitCount { .. })));
    }

    #[test]
    fn test_teleportation_sequence() {
        let circuit = teleportation(16).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        let kinds: Vec<GateKind> = circuit.gates().iter().map(Gate::kind).collect();
        assert_eq!(
            kinds,
            vec![
                GateKind::H,
                GateKind::Cnot,
                GateKind::Cnot,
                GateKind::H,
                GateKind::Cnot,
                GateKind::H,
                GateKind::Cnot,
                GateKind::H,
            ]
        );
    }

    #[test]
    fn test_normalize_to_angles() {
        let angles = normalize_to_angles(&[10.0, 15.0, 20.0]);
        assert!((angles[0]).abs() < 1e-12);
        assert!((angles[1] - PI / 2.0).abs() < 1e-12);
        assert!((angles[2] - PI).abs() < 1e-12);

        assert_eq!(normalize_to_angles(&[3.0, 3.0]), vec![PI / 2.0, PI / 2.0]);
    }

    #[test]
    fn test_angle_encoded() {
        let plain = angle_encoded(&[1.0, 2.0, 3.0], false, 16).unwrap();
        assert_eq!(plain.num_gates(), 3);
        assert!(plain.gates().iter().all(|g| g.kind() == GateKind::Ry));

        let chained = angle_encoded(&[1.0, 2.0, 3.0], true, 16).unwrap();
        assert_eq!(chained.num_gates(), 5);
        assert_eq!(chained.gates()[4].to_string(), "CNOT(1, 2)");
    }

    #[test]
    fn test_angle_encoded_empty_rejected() {
        assert!(matches!(
            angle_encoded(&[], false, 16),
            Err(IrError::InvalidQubitCount { count: 0, .. })
        ));
    }
}
