//! Hparams command implementation

use crate::cli::core::{HparamsArgs, OutputFormat};
use crate::cli::LogLevel;
use crate::hparams::PretrainConfig;

pub fn run_hparams(args: HparamsArgs, level: LogLevel) -> Result<(), String> {
    let config = PretrainConfig::t5_11b();

    match args.format {
        OutputFormat::Text => {
            level.log(LogLevel::Normal, "T5-11B pretraining configuration:");
            println!("Task/mixture: {}", config.mixture_or_task_name);
            println!(
                "Model: {} layers, emb_dim={}, mlp_dim={}, {} heads",
                config.num_layers, config.emb_dim, config.mlp_dim, config.num_heads
            );
            println!(
                "Batching: batch_size={} across {} partitions",
                config.batch_size, config.num_partitions
            );
            println!(
                "Schedule: {} (lr={}, warmup={})",
                config.schedule, config.learning_rate, config.warmup_steps
            );
            println!(
                "Run: {} epochs x {} steps, bfloat16={}",
                config.num_epochs, config.steps_per_epoch, config.use_bfloat16
            );
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}
