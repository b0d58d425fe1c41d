//! Circuit controller.
//!
//! The controller owns the current circuit and the stepping cursor, runs
//! every mutation through the [`Validator`], and hands execution to a
//! [`Backend`].
//!
//! ```text
//!                 create / preset / load
//!   NoCircuit ───────────────────────────→ Ready
//!                                          │  ▲
//!                  toggle_step_mode(true)  │  │  toggle_step_mode(false)
//!                                          ▼  │
//!                                 Stepping { cursor ∈ [0, gates] }
//! ```
//!
//! While stepping, [`CircuitController::get_active_circuit`] returns an
//! owned snapshot of the first `cursor` gates with no measurements.

use std::borrow::Cow;

use tracing::{debug, info};

use qlab_adapter_sim::SimulatorBackend;
use qlab_hal::{
    Backend, BackendFactory, BackendRegistry, Counts, ExecutionResult, HalError, HalResult, Program,
    StatevectorResult, Telemetry, translate, translate_for_diagram,
};
use qlab_ir::{Circuit, GateKind};

use crate::challenge::{ChallengeManager, ChallengeOutcome};
use crate::classical::ClassicalBits;
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::presets;
use crate::validator::Validator;

/// Observable controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No circuit has been created.
    NoCircuit,
    /// A circuit exists and is shown in full.
    Ready,
    /// A circuit exists and only its first `cursor` gates are shown.
    Stepping {
        /// Number of gates visible.
        cursor: usize,
        /// Gates in the full circuit.
        total: usize,
    },
}

/// Registry with every built-in backend, logging through `telemetry`.
pub fn default_registry(telemetry: &Telemetry) -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    let telemetry = telemetry.clone();
    registry.register_factory("simulator", move |config| -> HalResult<Box<dyn Backend>> {
        let backend = SimulatorBackend::from_config(config)?.with_telemetry(telemetry.clone());
        Ok(Box::new(backend))
    });
    registry
}

/// Facade over circuit construction, stepping and execution.
pub struct CircuitController {
    config: AppConfig,
    validator: Validator,
    backend: Box<dyn Backend>,
    telemetry: Telemetry,
    current: Option<Circuit>,
    step_mode: bool,
    cursor: usize,
}

impl CircuitController {
    /// Create a controller logging through the thread's current dispatcher.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        Self::with_telemetry(config, Telemetry::current())
    }

    /// Create a controller logging through `telemetry`.
    ///
    /// The backend is resolved by name from [`default_registry`]; an unknown
    /// name fails here, before any circuit exists.
    pub fn with_telemetry(config: AppConfig, telemetry: Telemetry) -> AppResult<Self> {
        config.validate()?;
        let registry = default_registry(&telemetry);
        let backend = registry.create(&config.default_backend, config.backend_config())?;
        Ok(Self::with_backend(config, backend, telemetry))
    }

    /// Create a controller around an already-built backend.
    pub fn with_backend(config: AppConfig, backend: Box<dyn Backend>, telemetry: Telemetry) -> Self {
        Self {
            validator: Validator::new(config.max_qubits),
            config,
            backend,
            telemetry,
            current: None,
            step_mode: false,
            cursor: 0,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The execution backend.
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    // =========================================================================
    // Circuit lifecycle
    // =========================================================================

    /// Replace the current circuit with an empty one of `num_qubits`.
    ///
    /// On error nothing changes, including the stepping state.
    pub fn create_circuit(&mut self, num_qubits: u32) -> AppResult<&Circuit> {
        self.validator.validate_qubit_count(num_qubits)?;
        let circuit = Circuit::with_max_qubits(num_qubits, self.validator.max_qubits())?;
        self.telemetry.scope(|| info!(num_qubits, "created circuit"));
        Ok(self.install(circuit))
    }

    /// Replace the current circuit with a Bell pair.
    pub fn create_bell_state(&mut self) -> AppResult<&Circuit> {
        let circuit = presets::bell(self.validator.max_qubits())?;
        self.install_preset("bell", circuit)
    }

    /// Replace the current circuit with an `n`-qubit GHZ state.
    pub fn create_ghz_state(&mut self, n: u32) -> AppResult<&Circuit> {
        self.validator.validate_qubit_count(n)?;
        let circuit = presets::ghz(n, self.validator.max_qubits())?;
        self.install_preset("ghz", circuit)
    }

    /// Replace the current circuit with the coherent teleportation circuit.
    pub fn create_teleportation_circuit(&mut self) -> AppResult<&Circuit> {
        let circuit = presets::teleportation(self.validator.max_qubits())?;
        self.install_preset("teleportation", circuit)
    }

    /// Replace the current circuit with an angle encoding of `values`.
    pub fn create_angle_encoded_circuit(
        &mut self,
        values: &[f64],
        correlated: bool,
    ) -> AppResult<&Circuit> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AppError::Validation("values must be finite".into()));
        }
        let count = u32::try_from(values.len()).unwrap_or(u32::MAX);
        self.validator.validate_qubit_count(count)?;
        let circuit = presets::angle_encoded(values, correlated, self.validator.max_qubits())?;
        self.install_preset("angle_encoded", circuit)
    }

    /// Replace the current circuit with `circuit`.
    pub fn load_circuit(&mut self, circuit: Circuit) -> AppResult<&Circuit> {
        self.validator.validate_qubit_count(circuit.num_qubits())?;
        self.install_preset("loaded", circuit)
    }

    fn install_preset(&mut self, name: &str, circuit: Circuit) -> AppResult<&Circuit> {
        self.telemetry.scope(|| {
            info!(
                preset = name,
                qubits = circuit.num_qubits(),
                gates = circuit.num_gates(),
                "installed circuit"
            );
        });
        Ok(self.install(circuit))
    }

    fn install(&mut self, circuit: Circuit) -> &Circuit {
        self.step_mode = false;
        self.cursor = 0;
        self.current.insert(circuit)
    }

    /// The current circuit, ignoring stepping.
    pub fn current_circuit(&self) -> Option<&Circuit> {
        self.current.as_ref()
    }

    /// Mutable access to the current circuit for fluent gate calls.
    ///
    /// Gates are append-only, so a live stepping cursor stays in range.
    pub fn circuit_mut(&mut self) -> AppResult<&mut Circuit> {
        self.current.as_mut().ok_or_else(no_circuit)
    }

    /// Append a gate described by kind, operand indices and optional angle.
    pub fn apply_gate(
        &mut self,
        kind: GateKind,
        qubits: &[u32],
        theta: Option<f64>,
    ) -> AppResult<&Circuit> {
        let circuit = self.current.as_mut().ok_or_else(no_circuit)?;
        let gate = self
            .validator
            .validate_gate_request(kind, qubits, theta, circuit.num_qubits())?;
        circuit.append(gate)?;
        self.telemetry.scope(|| debug!(%gate, "applied gate"));
        Ok(&*circuit)
    }

    /// Measure every qubit of the current circuit.
    pub fn measure_all(&mut self) -> AppResult<&Circuit> {
        let circuit = self.current.as_mut().ok_or_else(no_circuit)?;
        circuit.measure_all();
        Ok(&*circuit)
    }

    /// Add `qubits` to the current circuit's measurement list.
    pub fn measure(&mut self, qubits: &[u32]) -> AppResult<&Circuit> {
        let circuit = self.current.as_mut().ok_or_else(no_circuit)?;
        self.validator
            .validate_gate_targets(qubits, circuit.num_qubits())?;
        circuit.measure(qubits)?;
        Ok(&*circuit)
    }

    // =========================================================================
    // Stepping
    // =========================================================================

    /// The circuit the presentation layer should show.
    ///
    /// Outside step mode this borrows the current circuit. In step mode it
    /// is an owned prefix of `current_step()` gates with no measurements,
    /// independent of later changes to the current circuit.
    pub fn get_active_circuit(&self) -> Option<Cow<'_, Circuit>> {
        let circuit = self.current.as_ref()?;
        if !self.step_mode {
            return Some(Cow::Borrowed(circuit));
        }
        circuit
            .prefix(self.cursor.min(circuit.num_gates()))
            .ok()
            .map(Cow::Owned)
    }

    /// Enter or leave step mode.
    ///
    /// Entering resets the cursor to 0 and needs a circuit. Leaving keeps the
    /// cursor, though it is not observable until the next entry.
    pub fn toggle_step_mode(&mut self, active: bool) -> AppResult<()> {
        if active {
            if self.current.is_none() {
                return Err(no_circuit());
            }
            self.cursor = 0;
        }
        self.step_mode = active;
        self.telemetry
            .scope(|| debug!(active, cursor = self.cursor, "step mode toggled"));
        Ok(())
    }

    /// Advance the cursor by one gate. Returns whether it moved.
    pub fn step_forward(&mut self) -> bool {
        let total = match (&self.current, self.step_mode) {
            (Some(circuit), true) => circuit.num_gates(),
            _ => return false,
        };
        if self.cursor >= total {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move the cursor back by one gate. Returns whether it moved.
    pub fn step_backward(&mut self) -> bool {
        if self.current.is_none() || !self.step_mode || self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// The stepping cursor.
    pub fn current_step(&self) -> usize {
        self.cursor
    }

    /// Whether step mode is active.
    pub fn is_step_mode(&self) -> bool {
        self.step_mode
    }

    /// Where the controller is in its lifecycle.
    pub fn state(&self) -> ControllerState {
        match (&self.current, self.step_mode) {
            (None, _) => ControllerState::NoCircuit,
            (Some(_), false) => ControllerState::Ready,
            (Some(circuit), true) => ControllerState::Stepping {
                cursor: self.cursor,
                total: circuit.num_gates(),
            },
        }
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Sample the current circuit. Uses the configured default when `shots`
    /// is `None`. Returns the result and the program that was executed.
    pub fn run_simulation(&self, shots: Option<u32>) -> AppResult<(ExecutionResult, Program)> {
        let circuit = self.current.as_ref().ok_or_else(no_circuit)?;
        let shots = shots.unwrap_or(self.config.default_shots);
        self.telemetry.scope(|| -> AppResult<(ExecutionResult, Program)> {
            let program = translate(circuit);
            info!(
                backend = self.backend.name(),
                shots,
                qubits = program.num_qubits(),
                "running simulation"
            );
            let result = self.backend.run(&program, shots)?;
            Ok((result, program))
        })
    }

    /// Exact pre-measurement state of `circuit`.
    ///
    /// Fails without simulating when the register exceeds the configured
    /// statevector ceiling.
    pub fn get_statevector(&self, circuit: &Circuit) -> AppResult<StatevectorResult> {
        self.telemetry.scope(|| -> AppResult<StatevectorResult> {
            let max = self.config.statevector_max_qubits;
            if circuit.num_qubits() > max {
                return Err(HalError::StatevectorTooLarge {
                    num_qubits: circuit.num_qubits(),
                    max,
                }
                .into());
            }
            Ok(self.backend.run_statevector(&translate(circuit))?)
        })
    }

    /// Statevector of the active circuit (the step view while stepping).
    pub fn active_statevector(&self) -> AppResult<StatevectorResult> {
        let active = self.get_active_circuit().ok_or_else(no_circuit)?;
        self.get_statevector(&active)
    }

    /// ASCII diagram of the active circuit. Never runs a simulation.
    pub fn diagram(&self) -> AppResult<String> {
        let active = self.get_active_circuit().ok_or_else(no_circuit)?;
        Ok(translate_for_diagram(&active).draw())
    }

    /// Check the current circuit against the selected challenge.
    pub fn check_challenge(&self, manager: &ChallengeManager) -> AppResult<ChallengeOutcome> {
        let circuit = self.current.as_ref().ok_or_else(no_circuit)?;
        self.telemetry
            .scope(|| manager.check_solution(circuit, self.backend.as_ref()))
    }

    /// Counts from a classical register with bit `bit_index` set to `value`,
    /// read `default_shots` times.
    ///
    /// The register is no wider than `max_qubits`.
    pub fn classical_comparison(&self, bit_index: usize, value: u8) -> AppResult<Counts> {
        let max = self.config.max_qubits as usize;
        let width = bit_index
            .checked_add(1)
            .filter(|&w| w <= max)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Bit index {bit_index} out of range (register holds at most {max} bits)"
                ))
            })?;
        let mut bits = ClassicalBits::new(width);
        bits.set_bit(bit_index, value)?;
        Ok(bits.simulate(self.config.default_shots))
    }
}

fn no_circuit() -> AppError {
    AppError::State("No circuit defined. Create a circuit first.".into())
}
