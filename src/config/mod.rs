//! Declarative YAML configuration
//!
//! Run specifications pair an optimizer with an objective and training
//! parameters.
//!
//! # Example
//!
//! ```yaml
//! optimizer:
//!   name: sc_rmsprop
//!   lr: 0.5
//!   gamma: 0.9
//!   xi_1: 0.1
//!   xi_2: 0.1
//!
//! problem:
//!   kind: logistic
//!   samples: 200
//!   features: 5
//!   l2: 0.01
//!
//! training:
//!   steps: 500
//!   log_interval: 50
//!   grad_clip: 10.0
//!   checkpoint: runs/sc_rmsprop.json
//! ```

mod builder;
mod cli;
mod schema;
mod train;
mod validate;

pub use builder::{build_optimizer, build_scheduler};
pub use cli::{apply_overrides, parse_args, Cli, Command, RunArgs, ValidateArgs};
pub use schema::{OptimSpec, ProblemSpec, RunSpec, TrainingParams};
pub use train::{load_config, run_spec, train_from_yaml};
pub use validate::{
    allowed_hyperparameters, validate_config, validate_optim_spec, ValidationError,
    SCHEDULER_NAMES,
};
