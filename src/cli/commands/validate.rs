//! Validate command implementation

use crate::cli::core::ValidateArgs;
use crate::cli::LogLevel;
use crate::tasks::closed_book_qa_catalog;

pub fn run_validate(_args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    let catalog = closed_book_qa_catalog().map_err(|e| format!("Catalog error: {e}"))?;

    level.log(
        LogLevel::Verbose,
        &format!(
            "Checking {} tasks and {} mixtures",
            catalog.tasks().len(),
            catalog.mixtures().len()
        ),
    );

    catalog
        .validate()
        .map_err(|e| format!("Validation failed: {e}"))?;

    level.log(LogLevel::Normal, "Catalog is valid");
    Ok(())
}
