//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};

/// Preguntar: closed-book QA task catalog and training configuration
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "preguntar")]
#[command(version)]
#[command(about = "Inspect the closed-book QA task/mixture catalog and pretraining hyperparameters")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List registered tasks and mixtures
    Tasks(TasksArgs),

    /// Display a task or mixture in detail
    Info(InfoArgs),

    /// Validate the catalog
    Validate(ValidateArgs),

    /// Display the default pretraining hyperparameters
    Hparams(HparamsArgs),
}

/// Arguments for the tasks command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TasksArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Task or mixture name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {}

/// Arguments for the hparams command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct HparamsArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: OutputFormat,
}

/// Output format for inspection commands
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(format!(
                "Unknown output format: {s}. Valid formats: text, json, yaml"
            )),
        }
    }
}
