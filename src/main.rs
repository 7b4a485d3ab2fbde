//! Preguntar CLI
//!
//! Inspection entry point for the closed-book QA catalog.
//!
//! # Usage
//!
//! ```bash
//! # List registered tasks and mixtures
//! preguntar tasks
//!
//! # Show one task or mixture in detail
//! preguntar info trivia_qa_open
//! preguntar info closed_book_qa --format json
//!
//! # Validate the catalog
//! preguntar validate
//!
//! # Show the default pretraining hyperparameters
//! preguntar hparams --format yaml
//! ```

use clap::Parser;
use preguntar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
