//! CLI module for preguntar
//!
//! Contains the argument definitions, command handlers, and output utilities.

mod commands;
mod core;
mod logging;

pub use commands::run_command;
pub use core::{Cli, Command, HparamsArgs, InfoArgs, OutputFormat, TasksArgs, ValidateArgs};
pub use logging::LogLevel;
