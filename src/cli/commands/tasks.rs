//! Tasks command implementation

use serde::Serialize;

use crate::cli::core::{OutputFormat, TasksArgs};
use crate::cli::LogLevel;
use crate::tasks::closed_book_qa_catalog;

#[derive(Serialize)]
struct CatalogListing {
    tasks: Vec<String>,
    mixtures: Vec<String>,
}

pub fn run_tasks(args: TasksArgs, level: LogLevel) -> Result<(), String> {
    let catalog = closed_book_qa_catalog().map_err(|e| format!("Catalog error: {e}"))?;

    let listing = CatalogListing {
        tasks: catalog.tasks().names().map(String::from).collect(),
        mixtures: catalog.mixtures().names().map(String::from).collect(),
    };

    match args.format {
        OutputFormat::Text => {
            level.log(LogLevel::Normal, "Tasks:");
            for name in catalog.tasks().names() {
                let task = catalog
                    .tasks()
                    .get(name)
                    .map_err(|e| format!("Catalog error: {e}"))?;
                println!("  {name}");
                level.log(
                    LogLevel::Verbose,
                    &format!(
                        "    source={} cacheable={}",
                        task.source(),
                        task.supports_caching()
                    ),
                );
            }
            level.log(LogLevel::Normal, "Mixtures:");
            for name in catalog.mixtures().names() {
                println!("  {name}");
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&listing)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&listing)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}
