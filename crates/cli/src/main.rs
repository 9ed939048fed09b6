//! rqcache command-line entry point

mod cli;
mod commands;
mod errors;
mod logging;
mod settings;

use clap::Parser;
use cli::Cli;
use logging::TracingConfig;

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    logging::init_tracing(&TracingConfig {
        format: cli.log_format,
        level: cli.level.into(),
    })?;

    commands::run(cli)?;
    Ok(())
}
