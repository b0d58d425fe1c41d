//! Loading configuration from YAML files.

use std::io::Write;

use qlab_adapter_sim::{ENGINE_MAX_QUBITS, SimulatorBackend};
use qlab_app::{AppConfig, AppError, CircuitController, LogFormat};
use qlab_hal::{HalError, Telemetry};

#[test]
fn loads_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "default_shots: 128\nmax_qubits: 4\nstatevector_max_qubits: 3\nseed: 9\nlogging:\n  level: debug\n  format: json"
    )
    .unwrap();

    let config = AppConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.default_shots, 128);
    assert_eq!(config.max_qubits, 4);
    assert_eq!(config.statevector_max_qubits, 3);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.default_backend, "simulator");
}

#[test]
fn file_limits_reach_the_controller() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_qubits: 4\nstatevector_max_qubits: 2").unwrap();
    let config = AppConfig::from_yaml_file(file.path()).unwrap();

    let mut controller = CircuitController::with_telemetry(config, Telemetry::silent()).unwrap();
    assert!(matches!(controller.create_circuit(5), Err(AppError::Validation(_))));

    controller.create_circuit(3).unwrap();
    assert!(controller.active_statevector().is_err());
}

#[test]
fn invalid_yaml_is_a_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "default_shots: [not, a, number]").unwrap();
    assert!(matches!(
        AppConfig::from_yaml_file(file.path()),
        Err(AppError::Config(_))
    ));
}

#[test]
fn zero_shots_in_file_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "default_shots: 0").unwrap();
    assert!(AppConfig::from_yaml_file(file.path()).is_err());
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = AppConfig::from_yaml_file(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn oversize_limit_in_file_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_qubits: 64").unwrap();
    assert!(matches!(
        AppConfig::from_yaml_file(file.path()),
        Err(AppError::Config(_))
    ));
}

#[test]
fn engine_ceiling_limit_builds_a_controller() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_qubits: {ENGINE_MAX_QUBITS}\nseed: 2").unwrap();
    let config = AppConfig::from_yaml_file(file.path()).unwrap();

    let mut controller = CircuitController::with_telemetry(config, Telemetry::silent()).unwrap();
    assert_eq!(controller.backend().capabilities().num_qubits, ENGINE_MAX_QUBITS);
    assert!(matches!(
        controller.create_circuit(ENGINE_MAX_QUBITS + 1),
        Err(AppError::Validation(_))
    ));

    controller.create_circuit(2).unwrap();
    controller.measure_all().unwrap();
    let (result, _) = controller.run_simulation(Some(8)).unwrap();
    assert_eq!(result.counts.get("00"), 8);
}

#[test]
fn unvalidated_limit_fails_in_the_engine_not_with_a_panic() {
    let config = AppConfig {
        max_qubits: 64,
        statevector_max_qubits: 64,
        ..AppConfig::default()
    };
    let backend = SimulatorBackend::with_limits(64, 64);
    let mut controller = CircuitController::with_backend(config, Box::new(backend), Telemetry::silent());

    controller.create_circuit(64).unwrap();
    let circuit = controller.measure_all().unwrap().clone();
    assert!(matches!(
        controller.run_simulation(Some(1)),
        Err(AppError::Backend(HalError::CircuitTooLarge(_)))
    ));
    assert!(matches!(
        controller.get_statevector(&circuit),
        Err(AppError::Backend(HalError::StatevectorTooLarge { .. }))
    ));
}
