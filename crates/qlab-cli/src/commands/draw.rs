//! Draw command implementation.

use anyhow::Result;
use console::style;

use qlab_app::CircuitController;

use super::common::{CircuitArgs, build_circuit, describe_state, step_to};

/// Execute the draw command.
///
/// Measurements are only drawn when `--measure` was given.
pub fn execute(
    controller: &mut CircuitController,
    args: &CircuitArgs,
    step: Option<usize>,
) -> Result<()> {
    build_circuit(controller, args, args.measure.is_some())?;
    if let Some(steps) = step {
        step_to(controller, steps)?;
    }

    println!("{} {}\n", style("Circuit").cyan().bold(), describe_state(controller));
    print!("{}", controller.diagram()?);
    Ok(())
}
