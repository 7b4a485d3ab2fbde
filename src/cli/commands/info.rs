//! Info command implementation

use crate::cli::core::{InfoArgs, OutputFormat};
use crate::cli::LogLevel;
use crate::data::{ResolvedMixture, TaskSummary};
use crate::tasks::closed_book_qa_catalog;

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let catalog = closed_book_qa_catalog().map_err(|e| format!("Catalog error: {e}"))?;

    if let Ok(task) = catalog.tasks().get(&args.name) {
        return print_task(&task.summary(), args.format, level);
    }
    if catalog.mixtures().contains(&args.name) {
        let resolved = catalog
            .resolve_mixture(&args.name)
            .map_err(|e| format!("Mixture resolution error: {e}"))?;
        return print_mixture(&resolved, args.format, level);
    }
    Err(format!("No task or mixture named: {}", args.name))
}

fn print_task(summary: &TaskSummary, format: OutputFormat, level: LogLevel) -> Result<(), String> {
    match format {
        OutputFormat::Text => {
            level.log(LogLevel::Normal, &format!("Task: {}", summary.name));
            println!("Source: {}", summary.source);
            if summary.splits.is_empty() {
                println!("Splits: (source splits pass through)");
            } else {
                println!("Splits:");
                for (name, expr) in &summary.splits {
                    println!("  {name}: {expr}");
                }
            }
            println!("Pipeline: {}", summary.pipeline.join(" -> "));
            if let Some(token) = &summary.token_preprocessor {
                println!("Token preprocessor: {token}");
            }
            if let Some(postprocessor) = &summary.postprocessor {
                println!("Postprocess: {postprocessor}");
            }
            if !summary.metrics.is_empty() {
                println!("Metrics: {}", summary.metrics.join(", "));
            }
            println!("Cacheable: {}", summary.supports_caching);
            level.log(
                LogLevel::Verbose,
                &format!("Vocabulary: {}", summary.vocabulary),
            );
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(summary)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(summary)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }
    Ok(())
}

fn print_mixture(
    resolved: &ResolvedMixture,
    format: OutputFormat,
    level: LogLevel,
) -> Result<(), String> {
    match format {
        OutputFormat::Text => {
            level.log(
                LogLevel::Normal,
                &format!("Mixture: {}", resolved.name),
            );
            let total = resolved.total_rate();
            for entry in &resolved.rates {
                let share = if total > 0.0 {
                    100.0 * entry.rate / total
                } else {
                    0.0
                };
                println!("  {} rate={} ({share:.1}%)", entry.task, entry.rate);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(resolved)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(resolved)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }
    Ok(())
}
