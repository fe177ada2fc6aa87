//! YAML schema definitions for optimizer and run configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Complete run specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSpec {
    /// Optimizer configuration
    pub optimizer: OptimSpec,

    /// Objective to minimize
    pub problem: ProblemSpec,

    /// Training loop parameters
    #[serde(default)]
    pub training: TrainingParams,
}

/// Optimizer specification
///
/// The serialized form of an optimizer's hyperparameters. Every optimizer
/// returns one from `Optimizer::config`, and `build_optimizer` turns it back
/// into an equivalent optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimSpec {
    /// Optimizer name: "adagrad" | "rmsprop" | "sc_adagrad" | "rmsprop_variant" | "sc_rmsprop"
    pub name: String,

    /// Learning rate
    pub lr: f32,

    /// Optimizer-specific parameters (xi_1, xi_2, gamma, decay, etc.)
    #[serde(flatten)]
    pub params: HashMap<String, serde_json::Value>,
}

impl OptimSpec {
    pub fn new(name: impl Into<String>, lr: f32) -> Self {
        Self {
            name: name.into(),
            lr,
            params: HashMap::new(),
        }
    }

    /// Set a numeric hyperparameter
    pub fn with_param(mut self, key: &str, value: f32) -> Self {
        self.params.insert(key.to_string(), f32_to_json(value));
        self
    }

    /// Numeric hyperparameter, `None` if absent or not a number
    pub fn param(&self, key: &str) -> Option<f32> {
        self.params.get(key).and_then(|v| v.as_f64()).map(|v| v as f32)
    }

    /// Lowercase name with `-` normalized to `_`
    pub fn canonical_name(&self) -> String {
        self.name.trim().to_lowercase().replace('-', "_")
    }
}

// Go through the shortest decimal form so 0.1f32 serializes as 0.1 and reads back identical
fn f32_to_json(value: f32) -> serde_json::Value {
    let wide = value.to_string().parse::<f64>().unwrap_or(value as f64);
    serde_json::Number::from_f64(wide)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Objective specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProblemSpec {
    /// f(x) = Σ c_i x_i²
    Quadratic {
        /// Curvatures c_i
        #[serde(default = "default_scales")]
        scales: Vec<f32>,

        /// Starting point (defaults to all ones)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<Vec<f32>>,
    },

    /// f(x, y) = (a - x)² + b (y - x²)²
    Rosenbrock {
        #[serde(default = "default_rosenbrock_a")]
        a: f32,

        #[serde(default = "default_rosenbrock_b")]
        b: f32,

        /// Starting point (defaults to (-1.5, 2.0))
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<[f32; 2]>,
    },

    /// L2-regularized logistic regression on synthetic data
    Logistic {
        #[serde(default = "default_samples")]
        samples: usize,

        #[serde(default = "default_features")]
        features: usize,

        /// L2 penalty; any positive value makes the loss strongly convex
        #[serde(default = "default_l2")]
        l2: f32,

        #[serde(default)]
        seed: u64,
    },
}

impl ProblemSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            ProblemSpec::Quadratic { .. } => "quadratic",
            ProblemSpec::Rosenbrock { .. } => "rosenbrock",
            ProblemSpec::Logistic { .. } => "logistic",
        }
    }
}

/// Training loop parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Number of optimizer steps
    #[serde(default = "default_steps")]
    pub steps: u64,

    /// Log progress every N steps
    #[serde(default = "default_log_interval")]
    pub log_interval: u64,

    /// Gradient clipping by global norm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grad_clip: Option<f32>,

    /// Gradient clipping by value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_value: Option<f32>,

    /// Learning rate scheduler: "cosine" | "inverse_time" | "inverse_sqrt"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lr_scheduler: Option<String>,

    /// Floor for the cosine scheduler, rate for the inverse-time schedulers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler_param: Option<f32>,

    /// Write a checkpoint here when the run finishes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<PathBuf>,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            log_interval: default_log_interval(),
            grad_clip: None,
            clip_value: None,
            lr_scheduler: None,
            scheduler_param: None,
            checkpoint: None,
        }
    }
}

fn default_scales() -> Vec<f32> {
    vec![1.0, 10.0]
}

fn default_rosenbrock_a() -> f32 {
    1.0
}

fn default_rosenbrock_b() -> f32 {
    100.0
}

fn default_samples() -> usize {
    200
}

fn default_features() -> usize {
    5
}

fn default_l2() -> f32 {
    0.01
}

fn default_steps() -> u64 {
    100
}

fn default_log_interval() -> u64 {
    10
}
