//! CLI command implementations

mod hparams;
mod info;
mod tasks;
mod validate;

#[cfg(test)]
mod tests;

use crate::cli::core::{Cli, Command};
use crate::cli::LogLevel;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Tasks(args) => tasks::run_tasks(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Hparams(args) => hparams::run_hparams(args, log_level),
    }
}
