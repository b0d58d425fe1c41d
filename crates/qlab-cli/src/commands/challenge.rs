//! Challenge command implementation.

use anyhow::Result;
use console::style;

use qlab_app::{ChallengeManager, CircuitController, FIDELITY_THRESHOLD};

use super::common::{CircuitArgs, build_circuit};

/// List the built-in challenges.
pub fn execute_list() -> Result<()> {
    let manager = ChallengeManager::new()?;
    println!("{} Challenges:\n", style("qlab").cyan().bold());
    for challenge in manager.challenges() {
        println!(
            "  {} {} ({} qubit{})",
            style(challenge.key).bold(),
            challenge.name,
            challenge.num_qubits,
            if challenge.num_qubits == 1 { "" } else { "s" }
        );
        println!("    {}", challenge.description);
    }
    println!();
    println!("{}", threshold_note());
    Ok(())
}

/// Pass condition as shown to the user; solutions must beat the threshold.
fn threshold_note() -> String {
    format!("Pass threshold: fidelity > {FIDELITY_THRESHOLD}")
}

/// Check a circuit against one challenge.
pub fn execute_check(
    controller: &mut CircuitController,
    key: &str,
    args: &CircuitArgs,
) -> Result<()> {
    let mut manager = ChallengeManager::new()?;
    let challenge = manager.select(key)?;
    println!(
        "{} {}\n",
        style("Challenge:").cyan().bold(),
        style(challenge.name).bold()
    );

    build_circuit(controller, args, false)?;
    print!("{}", controller.diagram()?);
    println!();

    let outcome = controller.check_challenge(&manager)?;
    let verdict = if outcome.passed {
        style("PASSED").green().bold()
    } else {
        style("FAILED").red().bold()
    };
    match outcome.fidelity {
        Some(fidelity) => println!("{verdict} fidelity {fidelity:.4}"),
        None => println!("{verdict}"),
    }
    println!("{}", outcome.message);
    Ok(())
}
