//! # scoptim: adaptive optimizers with logarithmic regret
//!
//! Implements SC-Adagrad, SC-RMSProp and the RMSProp variant with
//! β_t = 1 - γ/t (Mukkamala & Hein, 2017) next to the stock Adagrad and
//! RMSProp they extend.
//!
//! ## Architecture
//!
//! - **tensor**: Trainable parameter with gradient slot and constraint
//! - **optim**: Optimizer trait, update rules, constraints, clipping, schedulers
//! - **config**: Declarative YAML configuration and CLI arguments
//! - **io**: Checkpoint saving and loading (JSON, YAML formats)
//! - **problems**: Closed-form objectives with analytic gradients
//! - **train**: High-level training loop

pub mod config;
pub mod io;
pub mod optim;
pub mod problems;
pub mod tensor;
pub mod train;

pub mod error;

// Re-export commonly used types
pub use error::{Error, Result};
pub use tensor::Tensor;
