//! Backends command implementation.

use anyhow::Result;
use console::style;

use qlab_app::{AppConfig, default_registry};
use qlab_hal::Telemetry;

/// Execute the backends command.
pub fn execute(config: &AppConfig, telemetry: &Telemetry) -> Result<()> {
    println!("{} Available backends:\n", style("qlab").cyan().bold());

    let registry = default_registry(telemetry);
    for name in registry.available_backends() {
        let is_default = name == config.default_backend;
        match registry.create(&name, config.backend_config()) {
            Ok(backend) => {
                let caps = backend.capabilities();
                println!(
                    "  {} {} {}{}",
                    style("●").green(),
                    style(&name).bold(),
                    if caps.is_simulator { "(local)" } else { "" },
                    if is_default { " [default]" } else { "" }
                );
                println!("    Qubits: {}", caps.num_qubits);
                println!("    Statevector up to: {} qubits", caps.statevector_max_qubits);
                println!("    Max shots: {}", caps.max_shots);
                println!(
                    "    Gates: {}",
                    caps.gate_set
                        .single_qubit
                        .iter()
                        .chain(&caps.gate_set.two_qubit)
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            Err(e) => {
                println!(
                    "  {} {} (not configured)",
                    style("○").dim(),
                    style(&name).dim()
                );
                println!("    {e}");
            }
        }
        println!();
    }

    if !config.hardware_available() {
        println!(
            "  {} {} (no token)",
            style("○").dim(),
            style("hardware").dim()
        );
        println!("    Set IBM_QUANTUM_TOKEN to enable hardware execution");
        println!();
    }
    Ok(())
}
