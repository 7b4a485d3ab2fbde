use super::*;
use crate::cli::core::{HparamsArgs, InfoArgs, OutputFormat, TasksArgs, ValidateArgs};
use crate::cli::{Cli, Command};
use clap::Parser;

#[test]
fn test_run_tasks_quiet() {
    let result = run_command(Cli {
        command: Command::Tasks(TasksArgs {
            format: OutputFormat::Json,
        }),
        verbose: false,
        quiet: true,
    });
    assert!(result.is_ok());
}

#[test]
fn test_run_info_task() {
    let result = run_command(Cli {
        command: Command::Info(InfoArgs {
            name: "trivia_qa_open".into(),
            format: OutputFormat::Yaml,
        }),
        verbose: false,
        quiet: true,
    });
    assert!(result.is_ok());
}

#[test]
fn test_run_info_mixture() {
    let result = run_command(Cli {
        command: Command::Info(InfoArgs {
            name: "closed_book_qa".into(),
            format: OutputFormat::Json,
        }),
        verbose: false,
        quiet: true,
    });
    assert!(result.is_ok());
}

#[test]
fn test_run_info_unknown_name() {
    let result = run_command(Cli {
        command: Command::Info(InfoArgs {
            name: "nonexistent".into(),
            format: OutputFormat::Text,
        }),
        verbose: false,
        quiet: true,
    });
    let err = result.unwrap_err();
    assert!(err.contains("nonexistent"));
}

#[test]
fn test_run_validate() {
    let result = run_command(Cli {
        command: Command::Validate(ValidateArgs {}),
        verbose: false,
        quiet: true,
    });
    assert!(result.is_ok());
}

#[test]
fn test_run_hparams() {
    let result = run_command(Cli {
        command: Command::Hparams(HparamsArgs {
            format: OutputFormat::Json,
        }),
        verbose: true,
        quiet: false,
    });
    assert!(result.is_ok());
}

#[test]
fn test_parsed_cli_round_trips_through_run() {
    let cli = Cli::try_parse_from(["preguntar", "--quiet", "tasks", "--format", "yaml"]).unwrap();
    assert!(run_command(cli).is_ok());
}
