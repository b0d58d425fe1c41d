//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit lab",
        style("qlab").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qlab-ir           Circuit model and gate algebra");
    println!("  qlab-hal          Programs, translation and the backend seam");
    println!("  qlab-adapter-sim  Statevector simulator");
    println!("  qlab-app          Controller, validation, presets and challenges");
    println!("  qlab-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
