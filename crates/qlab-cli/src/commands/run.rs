//! Run command implementation.

use anyhow::Result;
use console::style;

use qlab_app::CircuitController;

use super::common::{CircuitArgs, build_circuit};
use crate::OutputFormat;

/// Execute the run command.
pub fn execute(
    controller: &mut CircuitController,
    args: &CircuitArgs,
    shots: Option<u32>,
    qasm: bool,
    format: OutputFormat,
) -> Result<()> {
    build_circuit(controller, args, true)?;
    let (result, program) = controller.run_simulation(shots)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "{} {} shots on {}\n",
        style("Running").cyan().bold(),
        result.shots,
        style(controller.backend().name()).bold()
    );
    println!("{}", controller.diagram()?);

    if qasm {
        println!("{}", style("Program:").bold());
        println!("{}", program.to_qasm());
    }

    print!("{}", result.counts.to_table());
    if let Some((state, count)) = result.counts.most_frequent() {
        println!("Most frequent: {} ({count})", style(state).green().bold());
    }
    if let Some(ms) = result.execution_time_ms {
        println!("Execution time: {ms} ms");
    }
    Ok(())
}
