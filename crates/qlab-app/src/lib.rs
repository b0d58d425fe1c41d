//! qlab Application Layer
//!
//! The facade a front end talks to. It ties the logical circuit model
//! (`qlab-ir`) to an execution engine (`qlab-hal` + `qlab-adapter-sim`) and
//! adds the pieces an interactive tool needs around them:
//!
//! - [`CircuitController`]: circuit lifecycle, the stepping state machine,
//!   simulation and statevector requests
//! - [`Validator`]: qubit-count and gate-request checks run before mutation
//! - [`presets`]: Bell, GHZ, teleportation and angle-encoding circuits
//! - [`ChallengeManager`]: target-state exercises checked by fidelity
//! - [`ClassicalBits`]: deterministic register for comparison
//! - [`AppConfig`] and [`logging::build_telemetry`]: configuration and the
//!   injected tracing handle
//!
//! # Example
//!
//! ```
//! use qlab_app::{AppConfig, CircuitController};
//! use qlab_hal::Telemetry;
//!
//! let mut controller = CircuitController::with_telemetry(AppConfig::default(), Telemetry::silent())?;
//! controller.create_bell_state()?;
//! controller.measure_all()?;
//!
//! let (result, _program) = controller.run_simulation(Some(500))?;
//! assert_eq!(result.counts.total(), 500);
//!
//! controller.toggle_step_mode(true)?;
//! controller.step_forward();
//! assert_eq!(controller.get_active_circuit().unwrap().num_gates(), 1);
//! # Ok::<(), qlab_app::AppError>(())
//! ```

pub mod challenge;
pub mod classical;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod presets;
pub mod validator;

pub use challenge::{Challenge, ChallengeManager, ChallengeOutcome, FIDELITY_THRESHOLD};
pub use classical::{COMPARISON_NOTE, ClassicalBits};
pub use config::{AppConfig, LogFormat, LoggingConfig};
pub use controller::{CircuitController, ControllerState, default_registry};
pub use error::{AppError, AppResult};
pub use logging::build_telemetry;
pub use validator::Validator;
