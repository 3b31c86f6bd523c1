//! InfraAgent: generate infrastructure code from natural-language requests.
//!
//! This is the main entry point for the `infraagent` CLI. It loads `.env`,
//! parses arguments, initializes logging, dispatches to the generation
//! pipeline, and maps errors to exit codes.

mod ai;
mod artifacts;
mod cli;
mod commands;
mod config;
mod docs;
mod error;
mod exit_codes;
mod fs;
mod guide;
mod prompt;
mod request;
mod validate;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env is fine; the process environment still applies.
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    cli.init_logging();

    match commands::dispatch(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
