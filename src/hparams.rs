//! Pretraining hyperparameter configuration
//!
//! A flat record of every knob the T5-11B pretraining run is parameterized
//! by. Construction is pure: every field is a literal default, and merging
//! overrides on top is the caller's job. No validation happens here; the
//! consuming training framework owns consistency between dependent fields
//! (e.g. embedding dimension vs. shared-embedding flag).

use serde::{Deserialize, Serialize};

/// Hyperparameters for T5-11B pre-training.
///
/// Immutable after construction. Serializes to/from YAML and JSON; fields
/// absent from an input document fall back to the pinned defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PretrainConfig {
    /// T5 pretrained checkpoint to restore from (None = from scratch)
    pub restore_t5_checkpoint: Option<String>,

    /// Name of task/mixture to use for training
    pub mixture_or_task_name: String,
    /// Whether to use the preprocessing cache for the train task/mixture
    pub train_use_cached: bool,
    /// Name of task/mixture to use for evaluation
    pub eval_mixture_or_task_name: String,
    /// Whether to use the preprocessing cache for the eval task/mixture
    pub eval_use_cached: bool,
    /// Name of the split to use for evaluation
    pub eval_split: String,

    /// Whether to save model checkpoints
    pub save_checkpoints: bool,
    /// Whether to restore from existing model checkpoints
    pub restore_checkpoints: bool,
    /// Save a checkpoint every Nth epoch
    pub checkpoint_freq: usize,

    /// Number of epochs to train for
    pub num_epochs: usize,
    /// Number of steps per epoch
    pub steps_per_epoch: usize,
    /// Number of steps to take during evaluation
    pub num_eval_steps: usize,

    /// Collect profiler traces on host 0
    pub xprof: bool,
    /// Whether to use hardware rng for dropout
    pub hardware_rng: bool,
    /// Integer PRNG random seed
    pub random_seed: u64,
    /// Use infeed in the training loop
    pub infeed: bool,

    /// Total batch size for training
    pub batch_size: usize,
    /// Total batch size for inference on tasks
    pub eval_batch_size: usize,
    /// Number of gradient-accumulating microbatches (None = no accumulation)
    pub microbatches: Option<usize>,
    /// Number of SPMD partitions to use
    pub num_partitions: usize,
    /// Beam size for inference
    pub beam_size: usize,

    /// Learning rate schedule expression
    pub schedule: String,
    /// Base learning rate
    pub learning_rate: f64,
    /// Linear learning rate warmup steps
    pub warmup_steps: usize,
    /// Cross entropy loss label smoothing
    pub label_smoothing: f64,
    /// Cross entropy auxiliary z-loss coefficient
    pub z_loss: f64,
    /// Starting step offset of the fine-tuning phase for Adafactor
    pub step_offset: usize,

    /// Maximum input length cutoff for training examples
    pub max_input_length: usize,
    /// Maximum target length cutoff for training examples
    pub max_target_length: usize,
    /// Maximum input length cutoff for eval examples
    pub max_eval_input_length: usize,
    /// Maximum target length cutoff for eval examples
    pub max_eval_target_length: usize,

    /// Vocabulary size if no vocabulary path is given
    pub vocab_size: usize,
    /// Inputs and targets share embedding
    pub share_embeddings: bool,
    /// Final logit transform uses the embedding matrix transpose
    pub logits_via_embedding: bool,
    /// Number of transformer layers
    pub num_layers: usize,
    /// Size of query/key/value for attention
    pub qkv_dim: usize,
    /// Size of embeddings
    pub emb_dim: usize,
    /// Size of the MLP
    pub mlp_dim: usize,
    /// Activations in the MLP input
    pub mlp_activations: Vec<String>,
    /// Number of attention heads
    pub num_heads: usize,
    /// Number of relative-attention bins
    pub relative_attention_num_buckets: usize,
    /// Maximum distance for relative-attention bins
    pub relative_attention_max_distance: usize,
    /// Dropout rate
    pub dropout_rate: f64,
    /// Attention dropout rate
    pub attention_dropout_rate: f64,
    /// Use bfloat16 mixed precision training instead of float32
    pub use_bfloat16: bool,
}

impl PretrainConfig {
    /// Hyperparameters for T5-11B pre-training.
    #[must_use]
    pub fn t5_11b() -> Self {
        Self {
            restore_t5_checkpoint: None,
            mixture_or_task_name: "c4_v220_span_corruption".into(),
            train_use_cached: false,
            eval_mixture_or_task_name: "c4_v220_span_corruption".into(),
            eval_use_cached: false,
            eval_split: "validation".into(),
            save_checkpoints: true,
            restore_checkpoints: true,
            checkpoint_freq: 5,
            num_epochs: 100,
            steps_per_epoch: 1000,
            num_eval_steps: 20,
            xprof: true,
            hardware_rng: true,
            random_seed: 0,
            infeed: true,
            batch_size: 128,
            eval_batch_size: 128,
            microbatches: None,
            num_partitions: 8,
            beam_size: 1,
            schedule: "constant * rsqrt_decay".into(),
            learning_rate: 1.0,
            warmup_steps: 10_000,
            label_smoothing: 0.0,
            z_loss: 1e-4,
            step_offset: 0,
            max_input_length: 512,
            max_target_length: 512,
            max_eval_input_length: 512,
            max_eval_target_length: 512,
            vocab_size: 32_128,
            share_embeddings: true,
            logits_via_embedding: true,
            num_layers: 24,
            qkv_dim: 16_384,
            emb_dim: 1024,
            mlp_dim: 65_536,
            mlp_activations: vec!["relu".into()],
            num_heads: 128,
            relative_attention_num_buckets: 32,
            relative_attention_max_distance: 128,
            dropout_rate: 0.1,
            attention_dropout_rate: 0.1,
            use_bfloat16: true,
        }
    }
}

impl PretrainConfig {
    /// Load a configuration from a YAML file. Missing fields fall back to
    /// the pinned defaults.
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}

impl Default for PretrainConfig {
    fn default() -> Self {
        Self::t5_11b()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_t5_11b_architecture_defaults() {
        let config = PretrainConfig::t5_11b();
        assert_eq!(config.num_layers, 24);
        assert_eq!(config.qkv_dim, 16_384);
        assert_eq!(config.emb_dim, 1024);
        assert_eq!(config.mlp_dim, 65_536);
        assert_eq!(config.num_heads, 128);
        assert_eq!(config.vocab_size, 32_128);
        assert_eq!(config.mlp_activations, vec!["relu".to_string()]);
        assert!(config.share_embeddings);
        assert!(config.logits_via_embedding);
        assert!(config.use_bfloat16);
    }

    #[test]
    fn test_t5_11b_training_defaults() {
        let config = PretrainConfig::t5_11b();
        assert_eq!(config.batch_size, 128);
        assert_eq!(config.eval_batch_size, 128);
        assert_eq!(config.microbatches, None);
        assert_eq!(config.num_partitions, 8);
        assert_eq!(config.num_epochs, 100);
        assert_eq!(config.steps_per_epoch, 1000);
        assert_eq!(config.warmup_steps, 10_000);
        assert_eq!(config.schedule, "constant * rsqrt_decay");
        assert_abs_diff_eq!(config.learning_rate, 1.0);
        assert_abs_diff_eq!(config.z_loss, 1e-4);
        assert_abs_diff_eq!(config.label_smoothing, 0.0);
        assert_abs_diff_eq!(config.dropout_rate, 0.1);
    }

    #[test]
    fn test_t5_11b_task_defaults() {
        let config = PretrainConfig::t5_11b();
        assert_eq!(config.mixture_or_task_name, "c4_v220_span_corruption");
        assert_eq!(config.eval_mixture_or_task_name, "c4_v220_span_corruption");
        assert_eq!(config.eval_split, "validation");
        assert!(!config.train_use_cached);
        assert!(config.restore_t5_checkpoint.is_none());
    }

    #[test]
    fn test_default_is_t5_11b() {
        assert_eq!(PretrainConfig::default(), PretrainConfig::t5_11b());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = PretrainConfig::t5_11b();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: PretrainConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_round_trip() {
        let config = PretrainConfig::t5_11b();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: PretrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let parsed: PretrainConfig = serde_yaml::from_str("num_layers: 12\nbatch_size: 64\n").unwrap();
        assert_eq!(parsed.num_layers, 12);
        assert_eq!(parsed.batch_size, 64);
        // Everything else keeps the pinned defaults.
        assert_eq!(parsed.qkv_dim, 16_384);
        assert_eq!(parsed.schedule, "constant * rsqrt_decay");
    }
}
