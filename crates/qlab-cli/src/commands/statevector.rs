//! Statevector command implementation.

use anyhow::Result;
use console::style;

use qlab_app::CircuitController;

use super::common::{CircuitArgs, build_circuit, describe_state, step_to};

const ZERO_PROBABILITY: f64 = 1e-12;

/// Execute the statevector command.
pub fn execute(
    controller: &mut CircuitController,
    args: &CircuitArgs,
    step: Option<usize>,
    all: bool,
) -> Result<()> {
    build_circuit(controller, args, false)?;
    if let Some(steps) = step {
        step_to(controller, steps)?;
    }

    let state = controller.active_statevector()?;

    println!("{} {}\n", style("Statevector").cyan().bold(), describe_state(controller));
    println!("{:<12} | {:>24} | {:<12}", "Basis", "Amplitude", "Probability");
    println!("{}", "-".repeat(54));
    for (index, (amp, prob)) in state
        .amplitudes()
        .iter()
        .zip(state.probabilities())
        .enumerate()
    {
        if !all && prob < ZERO_PROBABILITY {
            continue;
        }
        println!(
            "{:<12} | {:>24} | {:<12.4}",
            format!("|{}>", state.basis_label(index)),
            format!("{:+.4} {:+.4}i", amp.re, amp.im),
            prob
        );
    }
    println!("{}", "-".repeat(54));
    Ok(())
}
