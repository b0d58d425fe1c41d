//! CLI argument parsing and command tests.
//!
//! Parsing is checked through clap's `try_parse_from`; commands are run
//! against a silent telemetry handle so they only print to stdout.

use clap::Parser;

use qlab_app::{AppConfig, CircuitController};
use qlab_cli::commands::common::{CircuitArgs, Preset, build_circuit, step_to};
use qlab_cli::{ChallengeAction, Cli, Commands, OutputFormat, execute, verbosity_filter};
use qlab_hal::Telemetry;
use qlab_ir::GateKind;

// ============================================================================
// Argument parsing
// ============================================================================

mod parsing {
    use super::*;

    #[test]
    fn test_run_with_preset_and_shots() {
        let cli = Cli::try_parse_from(["qlab", "run", "--preset", "bell", "--shots", "500"]).unwrap();
        match cli.command {
            Commands::Run {
                circuit,
                shots,
                qasm,
                format,
            } => {
                assert_eq!(circuit.preset, Some(Preset::Bell));
                assert_eq!(shots, Some(500));
                assert!(!qasm);
                assert_eq!(format, OutputFormat::Table);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_run_with_gates() {
        let cli = Cli::try_parse_from([
            "qlab", "run", "-q", "2", "-g", "h:0", "-g", "cx:0,1", "--measure", "1,0",
        ])
        .unwrap();
        let Commands::Run { circuit, shots, .. } = cli.command else {
            panic!("expected run");
        };
        assert_eq!(circuit.qubits, Some(2));
        assert_eq!(circuit.gates.len(), 2);
        assert_eq!(circuit.gates[1].kind, GateKind::Cnot);
        assert_eq!(circuit.measure, Some(vec![1, 0]));
        assert_eq!(shots, None);
    }

    #[test]
    fn test_bad_gate_spec_rejected() {
        assert!(Cli::try_parse_from(["qlab", "run", "-q", "1", "-g", "foo:0"]).is_err());
        assert!(Cli::try_parse_from(["qlab", "run", "-q", "1", "-g", "h"]).is_err());
    }

    #[test]
    fn test_unknown_preset_rejected() {
        assert!(Cli::try_parse_from(["qlab", "run", "--preset", "w_state"]).is_err());
    }

    #[test]
    fn test_negative_values_for_angles() {
        let cli = Cli::try_parse_from([
            "qlab",
            "statevector",
            "--preset",
            "angles",
            "--values",
            "-1.5,0,2",
            "--correlated",
        ])
        .unwrap();
        let Commands::Statevector { circuit, step, all } = cli.command else {
            panic!("expected statevector");
        };
        assert_eq!(circuit.values, vec![-1.5, 0.0, 2.0]);
        assert!(circuit.correlated);
        assert_eq!(step, None);
        assert!(!all);
    }

    #[test]
    fn test_draw_with_step() {
        let cli = Cli::try_parse_from(["qlab", "draw", "--preset", "ghz", "-q", "4", "--step", "2"])
            .unwrap();
        let Commands::Draw { circuit, step } = cli.command else {
            panic!("expected draw");
        };
        assert_eq!(circuit.qubits, Some(4));
        assert_eq!(step, Some(2));
    }

    #[test]
    fn test_challenge_check() {
        let cli = Cli::try_parse_from(["qlab", "challenge", "check", "bell_state", "-q", "2"])
            .unwrap();
        let Commands::Challenge {
            action: ChallengeAction::Check { key, circuit },
        } = cli.command
        else {
            panic!("expected challenge check");
        };
        assert_eq!(key, "bell_state");
        assert_eq!(circuit.qubits, Some(2));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["qlab", "backends", "-vv", "--config", "qlab.yaml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("qlab.yaml")));
        assert!(matches!(cli.command, Commands::Backends));
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(verbosity_filter(0), None);
        assert_eq!(verbosity_filter(1), Some("info"));
        assert_eq!(verbosity_filter(2), Some("debug"));
        assert_eq!(verbosity_filter(5), Some("trace"));
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(Cli::try_parse_from(["qlab"]).is_err());
    }
}

// ============================================================================
// Circuit building
// ============================================================================

mod building {
    use super::*;

    fn controller() -> CircuitController {
        let config = AppConfig {
            seed: Some(3),
            ..AppConfig::default()
        };
        CircuitController::with_telemetry(config, Telemetry::silent()).unwrap()
    }

    fn args(argv: &[&str]) -> CircuitArgs {
        let mut full = vec!["qlab", "draw"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Commands::Draw { circuit, .. } => circuit,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_qubits_required_without_preset() {
        let mut c = controller();
        let err = build_circuit(&mut c, &args(&["-g", "h:0"]), false).unwrap_err();
        assert!(err.to_string().contains("--qubits"));
    }

    #[test]
    fn test_gates_appended_after_preset() {
        let mut c = controller();
        build_circuit(&mut c, &args(&["--preset", "bell", "-g", "x:1"]), false).unwrap();
        let circuit = c.current_circuit().unwrap();
        assert_eq!(circuit.num_gates(), 3);
        assert!(!circuit.is_measured());
    }

    #[test]
    fn test_measure_defaults_to_all() {
        let mut c = controller();
        build_circuit(&mut c, &args(&["-q", "3", "-g", "h:0"]), true).unwrap();
        assert_eq!(c.current_circuit().unwrap().measurements().len(), 3);
    }

    #[test]
    fn test_out_of_range_gate_is_an_error() {
        let mut c = controller();
        let err = build_circuit(&mut c, &args(&["-q", "2", "-g", "h:5"]), false).unwrap_err();
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn test_step_to_stops_at_end() {
        let mut c = controller();
        build_circuit(&mut c, &args(&["--preset", "ghz", "-q", "3"]), false).unwrap();
        step_to(&mut c, 10).unwrap();
        assert_eq!(c.current_step(), 3);
        assert_eq!(c.get_active_circuit().unwrap().num_gates(), 3);
    }
}

// ============================================================================
// Command execution
// ============================================================================

mod execution {
    use super::*;

    fn run(argv: &[&str]) -> anyhow::Result<()> {
        let mut full = vec!["qlab"];
        full.extend_from_slice(argv);
        let cli = Cli::try_parse_from(full)?;
        let config = AppConfig {
            seed: Some(11),
            ..AppConfig::default()
        };
        execute(cli.command, config, Telemetry::silent())
    }

    #[test]
    fn test_run_bell() {
        run(&["run", "--preset", "bell", "--shots", "64"]).unwrap();
    }

    #[test]
    fn test_run_json() {
        run(&["run", "--preset", "teleport", "--format", "json", "--qasm"]).unwrap();
    }

    #[test]
    fn test_run_zero_shots_fails() {
        assert!(run(&["run", "--preset", "bell", "--shots", "0"]).is_err());
    }

    #[test]
    fn test_statevector_ceiling() {
        let err = run(&["statevector", "--preset", "ghz", "-q", "12"]).unwrap_err();
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn test_draw_and_backends() {
        run(&["draw", "-q", "2", "-g", "h:0", "-g", "cx:0,1", "--step", "1"]).unwrap();
        run(&["backends"]).unwrap();
        run(&["version"]).unwrap();
    }

    #[test]
    fn test_challenge_commands() {
        run(&["challenge", "list"]).unwrap();
        run(&["challenge", "check", "bell_state", "--preset", "bell"]).unwrap();
        assert!(run(&["challenge", "check", "nope", "-q", "1"]).is_err());
    }

    #[test]
    fn test_classical_value_checked() {
        run(&["classical", "--bit", "2", "--value", "1"]).unwrap();
        assert!(run(&["classical", "--value", "3"]).is_err());
        assert!(run(&["classical", "--bit", "100000000000", "--value", "1"]).is_err());
    }

    #[test]
    fn test_config_file_limits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qlab.yaml");
        std::fs::write(&path, "max_qubits: 3\nseed: 5\n").unwrap();

        let config = AppConfig::load(Some(path.as_path())).unwrap();
        let cli = Cli::try_parse_from(["qlab", "run", "-q", "4", "-g", "h:0"]).unwrap();
        assert!(execute(cli.command, config, Telemetry::silent()).is_err());
    }
}
