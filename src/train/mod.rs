//! High-level training loop
//!
//! - Trainer: gradient → clip → scheduled step → metrics, with divergence checks
//! - Training configuration
//! - Metrics tracking
//! - Checkpoint and resume
//!
//! # Example
//!
//! ```no_run
//! use scoptim::optim::SCRMSProp;
//! use scoptim::problems::{LogisticRegression, Objective};
//! use scoptim::train::{TrainConfig, Trainer};
//!
//! let objective = LogisticRegression::synthetic(200, 5, 0.01, 0);
//! let optimizer = SCRMSProp::default_params(0.5);
//! let config = TrainConfig::default().with_log_interval(50);
//!
//! let mut trainer = Trainer::new(objective.init_params(), Box::new(optimizer), config);
//! let result = trainer.fit(&objective, 500).unwrap();
//! println!("loss={:.4}", result.final_loss);
//! ```

mod config;
mod trainer;

pub use config::{MetricsTracker, TrainConfig};
pub use trainer::{TrainResult, Trainer};
