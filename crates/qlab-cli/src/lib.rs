//! qlab command-line interface.
//!
//! Argument definitions and command dispatch live here so the binary stays a
//! thin shell and the parser can be exercised from tests.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use qlab_app::{AppConfig, CircuitController};
use qlab_hal::Telemetry;

pub mod commands;

use commands::common::CircuitArgs;
use commands::{backends, challenge, classical, draw, run, statevector, version};

/// qlab - build, step through and simulate small quantum circuits
#[derive(Debug, Parser)]
#[command(name = "qlab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "QLAB_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a circuit and sample it on the simulator
    Run {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Number of shots (defaults to the configured value)
        #[arg(short, long)]
        shots: Option<u32>,

        /// Print the executed program as OpenQASM 3
        #[arg(long)]
        qasm: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print the exact amplitudes of a circuit before measurement
    Statevector {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Only apply the first N gates
        #[arg(long)]
        step: Option<usize>,

        /// Also list basis states with zero amplitude
        #[arg(long)]
        all: bool,
    },

    /// Draw a circuit without running it
    Draw {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Only draw the first N gates
        #[arg(long)]
        step: Option<usize>,
    },

    /// List available backends
    Backends,

    /// Work on the built-in challenges
    Challenge {
        #[command(subcommand)]
        action: ChallengeAction,
    },

    /// Read a classical register for comparison with a qubit
    Classical {
        /// Bit to set
        #[arg(long, default_value = "0")]
        bit: usize,

        /// Value to write (0 or 1)
        #[arg(long, default_value = "1")]
        value: u8,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ChallengeAction {
    /// List the challenges
    List,

    /// Check a circuit against a challenge
    Check {
        /// Challenge key, e.g. bell_state
        key: String,

        #[command(flatten)]
        circuit: CircuitArgs,
    },
}

/// How sampled results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable counts table.
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Filter directive for a `-v` count, or `None` to keep the configured one.
pub fn verbosity_filter(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Execute a parsed command.
pub fn execute(command: Commands, config: AppConfig, telemetry: Telemetry) -> Result<()> {
    match command {
        Commands::Backends => backends::execute(&config, &telemetry),
        Commands::Version => {
            version::execute();
            Ok(())
        }
        Commands::Classical { bit, value } => {
            let controller = CircuitController::with_telemetry(config, telemetry)?;
            classical::execute(&controller, bit, value)
        }
        Commands::Run {
            circuit,
            shots,
            qasm,
            format,
        } => {
            let mut controller = CircuitController::with_telemetry(config, telemetry)?;
            run::execute(&mut controller, &circuit, shots, qasm, format)
        }
        Commands::Statevector { circuit, step, all } => {
            let mut controller = CircuitController::with_telemetry(config, telemetry)?;
            statevector::execute(&mut controller, &circuit, step, all)
        }
        Commands::Draw { circuit, step } => {
            let mut controller = CircuitController::with_telemetry(config, telemetry)?;
            draw::execute(&mut controller, &circuit, step)
        }
        Commands::Challenge { action } => match action {
            ChallengeAction::List => challenge::execute_list(),
            ChallengeAction::Check { key, circuit } => {
                let mut controller = CircuitController::with_telemetry(config, telemetry)?;
                challenge::execute_check(&mut controller, &key, &circuit)
            }
        },
    }
}
