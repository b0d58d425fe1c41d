//! qlab Hardware Abstraction Layer
//!
//! This crate sits between the logical circuit model and the engines that
//! execute it. It provides:
//! - [`translate`] and [`translate_for_diagram`], turning a
//!   [`qlab_ir::Circuit`] into a native [`Program`]
//! - the [`Backend`] trait every engine implements, with [`Capabilities`]
//!   describing its limits
//! - a [`BackendRegistry`] resolving engine names to instances
//! - result types: [`Counts`], [`ExecutionResult`] and [`StatevectorResult`]
//! - [`Telemetry`], the tracing dispatcher components log through
//!
//! # Supported Backends
//!
//! | Backend | Crate | Authentication |
//! |---------|-------|----------------|
//! | Local Simulator | `qlab-adapter-sim` | None |
//!
//! # Example: Translating a Circuit
//!
//! ```
//! use qlab_hal::{translate, translate_for_diagram};
//! use qlab_ir::Circuit;
//!
//! let mut circuit = Circuit::new(2)?;
//! circuit.h(0)?.cx(0, 1)?;
//!
//! // Without measurements the diagram form carries no classical register.
//! assert_eq!(translate_for_diagram(&circuit).num_clbits(), 0);
//!
//! circuit.measure_all();
//! let program = translate(&circuit);
//! assert_eq!(program.gate_count(), 2);
//! assert_eq!(program.measurement_count(), 2);
//! # Ok::<(), qlab_ir::IrError>(())
//! ```
//!
//! # Implementing a Custom Backend
//!
//! ```ignore
//! use qlab_hal::{Backend, Capabilities, ExecutionResult, HalResult, Program, StatevectorResult};
//!
//! struct MyBackend {
//!     capabilities: Capabilities,
//! }
//!
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     fn run(&self, program: &Program, shots: u32) -> HalResult<ExecutionResult> {
//!         # todo!()
//!     }
//!
//!     fn run_statevector(&self, program: &Program) -> HalResult<StatevectorResult> {
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod error;
pub mod program;
pub mod registry;
pub mod result;
pub mod telemetry;
pub mod translate;

pub use backend::{Backend, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet};
pub use error::{HalError, HalResult};
pub use program::{Instruction, Operation, Program};
pub use registry::BackendRegistry;
pub use result::{Counts, ExecutionResult, StatevectorResult};
pub use telemetry::Telemetry;
pub use translate::{native_instruction, translate, translate_for_diagram};
