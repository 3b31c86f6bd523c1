//! Command implementations for infraagent.
//!
//! Every subcommand runs the same pipeline; they differ only in the
//! [`GenerationRequest`](crate::request::GenerationRequest) they build.

mod generate;
mod report;


use crate::ai::GeminiClient;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::{InfraError, Result};
use crate::prompt::build_prompt;
use chrono::Utc;

use generate::run_generation;

/// Load configuration and run the selected command.
pub fn dispatch(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| InfraError::Config(format!("cannot determine working directory: {}", e)))?;

    let config = Config::discover(cli.config.as_deref(), &cwd)?
        .with_env(|name| std::env::var(name).ok())?;
    config.validate()?;
    log::debug!("effective configuration: {:?}", config);

    execute(&cli.command, &config)
}

/// Run `command` with an already-loaded configuration.
///
/// A dry run prints the prompt and stops there: no API key is needed and
/// nothing is written.
pub fn execute(command: &Command, config: &Config) -> Result<()> {
    let request = command.to_request(&config.output_dir);

    if command.output_args().dry_run {
        let prompt = build_prompt(&request)?;
        println!("{}", prompt.text);
        return Ok(());
    }

    // Validate flags before asking for credentials.
    build_prompt(&request)?;
    let client = GeminiClient::from_config(config)?;

    let report = run_generation(&request, &client, Utc::now())?;
    report::print_report(&request, &report);
    Ok(())
}
