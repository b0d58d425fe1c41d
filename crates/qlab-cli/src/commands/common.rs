//! Shared helpers for CLI commands.

use std::str::FromStr;

use anyhow::{Result, bail};
use clap::{Args, ValueEnum};
use console::style;

use qlab_app::CircuitController;
use qlab_ir::GateKind;

/// Built-in circuits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Two-qubit Bell state.
    Bell,
    /// GHZ state over `--qubits` (default 3).
    Ghz,
    /// Three-qubit coherent teleportation.
    Teleport,
    /// One RY per value in `--values`.
    Angles,
}

/// A gate given on the command line as `name:q[,q][:theta]`.
///
/// Examples: `h:0`, `cx:0,1`, `ry:2:1.5708`.
#[derive(Debug, Clone, PartialEq)]
pub struct GateSpec {
    pub kind: GateKind,
    pub qubits: Vec<u32>,
    pub theta: Option<f64>,
}

impl FromStr for GateSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let name = parts.next().unwrap_or_default().trim();
        let kind = name.parse::<GateKind>().map_err(|e| e.to_string())?;

        let qubits = parts
            .next()
            .ok_or_else(|| format!("gate '{s}' has no qubits (expected name:q[,q][:theta])"))?
            .split(',')
            .map(|q| {
                q.trim()
                    .parse::<u32>()
                    .map_err(|_| format!("invalid qubit index '{}' in '{s}'", q.trim()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let theta = parts
            .next()
            .map(|t| {
                t.trim()
                    .parse::<f64>()
                    .map_err(|_| format!("invalid angle '{}' in '{s}'", t.trim()))
            })
            .transpose()?;

        Ok(Self {
            kind,
            qubits,
            theta,
        })
    }
}

/// Arguments describing the circuit a command works on.
#[derive(Debug, Clone, Args)]
pub struct CircuitArgs {
    /// Start from a built-in circuit
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Register size (required without --preset, GHZ size with it)
    #[arg(short, long)]
    pub qubits: Option<u32>,

    /// Gate to append, e.g. h:0, cx:0,1, ry:1:0.5 (repeatable)
    #[arg(short, long = "gate", value_name = "SPEC")]
    pub gates: Vec<GateSpec>,

    /// Data values for the angles preset
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub values: Vec<f64>,

    /// Chain the angles preset with CNOTs
    #[arg(long)]
    pub correlated: bool,

    /// Qubits to measure, in readout order (default: all)
    #[arg(short, long, value_delimiter = ',')]
    pub measure: Option<Vec<u32>>,
}

/// Install the circuit described by `args` in `controller`.
///
/// With `measure` set, the listed qubits (or all of them) are measured after
/// the gates.
pub fn build_circuit(
    controller: &mut CircuitController,
    args: &CircuitArgs,
    measure: bool,
) -> Result<()> {
    match args.preset {
        Some(Preset::Bell) => {
            controller.create_bell_state()?;
        }
        Some(Preset::Ghz) => {
            controller.create_ghz_state(args.qubits.unwrap_or(3))?;
        }
        Some(Preset::Teleport) => {
            controller.create_teleportation_circuit()?;
        }
        Some(Preset::Angles) => {
            controller.create_angle_encoded_circuit(&args.values, args.correlated)?;
        }
        None => {
            let Some(n) = args.qubits else {
                bail!("--qubits is required when no --preset is given");
            };
            controller.create_circuit(n)?;
        }
    }

    for gate in &args.gates {
        controller.apply_gate(gate.kind, &gate.qubits, gate.theta)?;
    }

    if measure {
        match &args.measure {
            Some(qubits) => {
                controller.measure(qubits)?;
            }
            None => {
                controller.measure_all()?;
            }
        }
    }
    Ok(())
}

/// Enter step mode and advance `steps` gates (stopping at the end).
pub fn step_to(controller: &mut CircuitController, steps: usize) -> Result<()> {
    controller.toggle_step_mode(true)?;
    for _ in 0..steps {
        if !controller.step_forward() {
            break;
        }
    }
    Ok(())
}

/// One-line summary of where the controller stands.
pub fn describe_state(controller: &CircuitController) -> String {
    match controller.state() {
        qlab_app::ControllerState::NoCircuit => style("no circuit").dim().to_string(),
        qlab_app::ControllerState::Ready => {
            let gates = controller.current_circuit().map_or(0, |c| c.num_gates());
            format!("{} ({gates} gates)", style("ready").green())
        }
        qlab_app::ControllerState::Stepping { cursor, total } => {
            format!("{} step {cursor}/{total}", style("stepping").yellow())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_qubit_gate() {
        let spec: GateSpec = "h:0".parse().unwrap();
        assert_eq!(spec.kind, GateKind::H);
        assert_eq!(spec.qubits, vec![0]);
        assert_eq!(spec.theta, None);
    }

    #[test]
    fn test_parse_two_qubit_and_rotation() {
        let cx: GateSpec = "CNOT:0,2".parse().unwrap();
        assert_eq!(cx.kind, GateKind::Cnot);
        assert_eq!(cx.qubits, vec![0, 2]);

        let ry: GateSpec = "ry:1:-0.5".parse().unwrap();
        assert_eq!(ry.kind, GateKind::Ry);
        assert_eq!(ry.theta, Some(-0.5));
    }

    #[test]
    fn test_parse_errors() {
        assert!("foo:0".parse::<GateSpec>().is_err());
        assert!("h".parse::<GateSpec>().is_err());
        assert!("h:a".parse::<GateSpec>().is_err());
        assert!("rx:0:pi".parse::<GateSpec>().is_err());
    }
}
