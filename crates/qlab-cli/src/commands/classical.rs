//! Classical comparison command implementation.

use anyhow::Result;
use console::style;

use qlab_app::{COMPARISON_NOTE, CircuitController};

/// Execute the classical command.
pub fn execute(controller: &CircuitController, bit: usize, value: u8) -> Result<()> {
    let counts = controller.classical_comparison(bit, value)?;

    println!(
        "{} bit {bit} set to {value}, read {} times\n",
        style("Classical register:").cyan().bold(),
        counts.total()
    );
    print!("{}", counts.to_table());
    println!();
    println!("{}", style(COMPARISON_NOTE).dim());
    Ok(())
}
