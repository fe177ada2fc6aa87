//! Training configuration and metrics

use crate::config::TrainingParams;
use std::path::PathBuf;

/// Training configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TrainConfig {
    /// Maximum global gradient norm (None = no clipping)
    pub max_grad_norm: Option<f32>,

    /// Per-element gradient clip (None = no clipping)
    pub clip_value: Option<f32>,

    /// Log training progress every N steps
    pub log_interval: u64,

    /// Save a checkpoint here when `fit` finishes
    pub checkpoint_path: Option<PathBuf>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            max_grad_norm: None,
            clip_value: None,
            log_interval: 10,
            checkpoint_path: None,
        }
    }
}

impl TrainConfig {
    /// Create a new training configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Training configuration from the `training` section of a run spec
    pub fn from_params(params: &TrainingParams) -> Self {
        Self {
            max_grad_norm: params.grad_clip,
            clip_value: params.clip_value,
            log_interval: params.log_interval.max(1),
            checkpoint_path: params.checkpoint.clone(),
        }
    }

    /// Set gradient clipping norm
    pub fn with_grad_clip(mut self, max_norm: f32) -> Self {
        self.max_grad_norm = Some(max_norm);
        self
    }

    /// Set per-element gradient clipping
    pub fn with_clip_value(mut self, clip: f32) -> Self {
        self.clip_value = Some(clip);
        self
    }

    /// Set logging interval
    pub fn with_log_interval(mut self, interval: u64) -> Self {
        self.log_interval = interval.max(1);
        self
    }

    /// Save a checkpoint when training finishes
    pub fn with_checkpoint(mut self, path: impl Into<PathBuf>) -> Self {
        self.checkpoint_path = Some(path.into());
        self
    }
}

/// Tracks per-step training metrics
#[derive(Clone, Debug, Default)]
pub struct MetricsTracker {
    /// Loss before each step
    pub losses: Vec<f32>,

    /// Learning rate used by each step
    pub learning_rates: Vec<f32>,

    /// Pre-clip global gradient norm of each step
    pub grad_norms: Vec<f32>,

    /// Steps taken by this trainer
    pub steps: u64,
}

impl MetricsTracker {
    /// Create a new metrics tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one step
    pub fn record_step(&mut self, loss: f32, lr: f32, grad_norm: f32) {
        self.losses.push(loss);
        self.learning_rates.push(lr);
        self.grad_norms.push(grad_norm);
        self.steps += 1;
    }

    /// Get best (minimum) loss
    pub fn best_loss(&self) -> Option<f32> {
        self.losses.iter().copied().min_by(f32::total_cmp)
    }

    /// Get average loss over last N steps
    pub fn avg_loss(&self, n: usize) -> f32 {
        if self.losses.is_empty() || n == 0 {
            return 0.0;
        }

        let start = self.losses.len().saturating_sub(n);
        let window = &self.losses[start..];
        window.iter().sum::<f32>() / window.len() as f32
    }

    /// Check if the loss went down at least once in the last `patience` steps
    pub fn is_improving(&self, patience: usize) -> bool {
        if self.losses.len() <= patience {
            return true;
        }

        let recent = &self.losses[self.losses.len() - patience - 1..];
        recent.windows(2).any(|w| w[1] < w[0])
    }
}
