//! qlab command-line interface.
//!
//! The main entry point for the `qlab` tool.

use clap::Parser;
use console::style;

use qlab_app::{AppConfig, build_telemetry};
use qlab_cli::{Cli, execute, verbosity_filter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = AppConfig::load(cli.config.as_deref())
        .map_err(anyhow::Error::from)
        .and_then(|mut config| {
            if let Some(level) = verbosity_filter(cli.verbose) {
                config.logging.level = level.to_string();
            }
            let telemetry = build_telemetry(&config.logging)?;
            // The binary owns the process, so its subscriber becomes the default.
            tracing::dispatcher::set_global_default(telemetry.dispatch().clone())?;
            execute(cli.command, config, telemetry)
        });

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
