//! Optimizers for training with adaptive per-parameter step sizes
//!
//! - **Adagrad**, **RMSProp**: stock baselines
//! - **SC-Adagrad**, **SC-RMSProp**: variants for strongly convex objectives
//! - **RMSPropVariant**: RMSProp with β_t = 1 - γ/t

mod accumulator;
mod adagrad;
mod clip;
mod constraint;
mod optimizer;
mod rmsprop;
mod rmsprop_variant;
mod sc_adagrad;
mod sc_rmsprop;
mod scheduler;
mod state;


pub use adagrad::Adagrad;
pub use clip::{clip_grad_norm, clip_grad_value, grad_norm};
pub use constraint::{Constraint, MaxNorm, NonNeg, UnitNorm, ValueRange};
pub use optimizer::Optimizer;
pub use rmsprop::RMSProp;
pub use rmsprop_variant::RMSPropVariant;
pub use sc_adagrad::SCAdagrad;
pub use sc_rmsprop::SCRMSProp;
pub use scheduler::{CosineAnnealingLR, InverseTimeLR, LRScheduler};
pub use state::OptimizerState;

/// Registry names of every optimizer, in the order `scoptim list` prints them
pub const OPTIMIZER_NAMES: [&str; 5] = [
    Adagrad::NAME,
    RMSProp::NAME,
    SCAdagrad::NAME,
    RMSPropVariant::NAME,
    SCRMSProp::NAME,
];
