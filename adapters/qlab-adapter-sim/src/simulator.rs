//! Simulator backend implementation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::time::Instant;
use tracing::{debug, instrument, warn};

use qlab_hal::{
    Backend, BackendConfig, BackendFactory, Capabilities, Counts, ExecutionResult, HalError,
    HalResult, Program, StatevectorResult, Telemetry,
};

use crate::statevector::Statevector;

/// Default register limit for sampling.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Default register limit for amplitude retrieval.
pub const DEFAULT_STATEVECTOR_MAX_QUBITS: u32 = 10;

/// Largest register the engine will ever allocate (2^24 amplitudes, 256 MB).
///
/// Configured limits above this are refused.
pub const ENGINE_MAX_QUBITS: u32 = 24;

/// Local simulator backend.
///
/// Programs are simulated once as a pure state; measurement outcomes are then
/// drawn `shots` times from the final distribution. Memory grows as 2^n, so
/// sampling is capped at [`DEFAULT_MAX_QUBITS`] and amplitude retrieval at
/// the lower [`DEFAULT_STATEVECTOR_MAX_QUBITS`] unless configured otherwise.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Cached capabilities.
    capabilities: Capabilities,
    /// Fixed RNG seed; each run starts from it when set.
    seed: Option<u64>,
    /// Where simulation events are logged.
    telemetry: Telemetry,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_QUBITS, DEFAULT_STATEVECTOR_MAX_QUBITS)
    }

    /// Create a simulator with custom register limits, clamped to
    /// [`ENGINE_MAX_QUBITS`].
    pub fn with_limits(max_qubits: u32, statevector_max_qubits: u32) -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            capabilities: Capabilities::simulator(
                max_qubits.min(ENGINE_MAX_QUBITS),
                statevector_max_qubits.min(ENGINE_MAX_QUBITS),
            ),
            seed: None,
            telemetry: Telemetry::current(),
        }
    }

    /// Fix the sampling seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Log through `telemetry` instead of the thread default.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Telemetry) -> Self {
        self.telemetry = telemetry;
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Reject programs whose operands fall outside their registers.
    fn check_operands(program: &Program) -> HalResult<()> {
        for (pos, inst) in program.instructions().iter().enumerate() {
            if inst.qubits.len() != inst.op.num_qubits() {
                return Err(HalError::InvalidProgram(format!(
                    "instruction {pos} ({}) expects {} qubits, got {}",
                    inst.op.qasm_name(),
                    inst.op.num_qubits(),
                    inst.qubits.len()
                )));
            }
            if let Some(q) = inst.qubits.iter().find(|q| q.0 >= program.num_qubits()) {
                return Err(HalError::InvalidProgram(format!(
                    "instruction {pos} ({}) addresses {q} in a {}-qubit register",
                    inst.op.qasm_name(),
                    program.num_qubits()
                )));
            }
            if inst.op.is_measure() {
                match inst.clbits.first() {
                    Some(c) if c.0 < program.num_clbits() => {}
                    _ => {
                        return Err(HalError::InvalidProgram(format!(
                            "measurement {pos} has no valid classical target"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn simulate(program: &Program) -> Statevector {
        let mut sv = Statevector::new(program.num_qubits() as usize);
        for inst in program.instructions() {
            sv.apply(inst);
        }
        sv
    }

    #[instrument(skip(self, program), fields(qubits = program.num_qubits()))]
    fn sample(&self, program: &Program, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();

        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots exceeds the limit of {}",
                self.capabilities.max_shots
            )));
        }
        if program.num_qubits() > self.capabilities.num_qubits {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                program.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        Self::check_operands(program)?;

        // (qubit, clbit) pairs in program order; a later write to the same
        // clbit wins.
        let readout: Vec<(usize, usize)> = program
            .instructions()
            .iter()
            .filter(|inst| inst.op.is_measure())
            .map(|inst| (inst.qubits[0].index(), inst.clbits[0].index()))
            .collect();
        if readout.is_empty() {
            return Err(HalError::NoMeasurements);
        }

        debug!("Starting simulation: {} shots", shots);
        let sv = Self::simulate(program);
        let sampler = sv.sampler();
        let mut rng = self.rng();

        let mut by_outcome: FxHashMap<usize, u64> = FxHashMap::default();
        for _ in 0..shots {
            *by_outcome.entry(sampler.sample(&mut rng)).or_insert(0) += 1;
        }

        let num_clbits = program.num_clbits() as usize;
        let counts: Counts = by_outcome
            .into_iter()
            .map(|(outcome, n)| (classical_bitstring(outcome, &readout, num_clbits), n))
            .collect();

        let elapsed = start.elapsed();
        debug!(
            distinct = counts.len(),
            "Simulation completed in {:?}", elapsed
        );
        Ok(ExecutionResult::new(counts, shots).with_execution_time(elapsed.as_millis() as u64))
    }

    #[instrument(skip(self, program), fields(qubits = program.num_qubits()))]
    fn amplitudes(&self, program: &Program) -> HalResult<StatevectorResult> {
        let max = self.capabilities.statevector_max_qubits;
        // Checked before the 2^n allocation.
        if program.num_qubits() > max {
            warn!(max, "statevector request refused");
            return Err(HalError::StatevectorTooLarge {
                num_qubits: program.num_qubits(),
                max,
            });
        }
        Self::check_operands(program)?;

        let sv = Self::simulate(&program.without_measurements());
        debug!("Computed statevector over {} qubits", sv.num_qubits());
        StatevectorResult::new(program.num_qubits(), sv.into_amplitudes())
            .ok_or_else(|| HalError::Execution("amplitude vector has the wrong length".into()))
    }
}

/// Render the classical register for one basis outcome, clbit 0 rightmost.
fn classical_bitstring(outcome: usize, readout: &[(usize, usize)], num_clbits: usize) -> String {
    let mut bits = vec![b'0'; num_clbits];
    for &(qubit, clbit) in readout {
        bits[num_clbits - 1 - clbit] = if (outcome >> qubit) & 1 == 1 { b'1' } else { b'0' };
    }
    String::from_utf8(bits).unwrap_or_default()
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn run(&self, program: &Program, shots: u32) -> HalResult<ExecutionResult> {
        self.telemetry.scope(|| self.sample(program, shots))
    }

    fn run_statevector(&self, program: &Program) -> HalResult<StatevectorResult> {
        self.telemetry.scope(|| self.amplitudes(program))
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let limit = |key: &str, default: u32| -> HalResult<u32> {
            match config.extra_u64(key) {
                None => Ok(default),
                Some(0) => Err(HalError::Configuration(format!("{key} must be at least 1"))),
                Some(v) if v > u64::from(ENGINE_MAX_QUBITS) => Err(HalError::Configuration(
                    format!("{key} is {v}, the engine supports at most {ENGINE_MAX_QUBITS}"),
                )),
                Some(v) => u32::try_from(v)
                    .map_err(|_| HalError::Configuration(format!("{key} out of range: {v}"))),
            }
        };
        let max_qubits = limit("max_qubits", DEFAULT_MAX_QUBITS)?;
        let statevector_max_qubits =
            limit("statevector_max_qubits", DEFAULT_STATEVECTOR_MAX_QUBITS)?;
        let seed = config.extra_u64("seed");

        Ok(Self {
            capabilities: Capabilities::simulator(max_qubits, statevector_max_qubits),
            config,
            seed,
            telemetry: Telemetry::current(),
        })
    }
}
