//! Optimizer trait

use super::OptimizerState;
use crate::config::OptimSpec;
use crate::{Result, Tensor};

/// Trait for optimization algorithms
///
/// This is the plugin contract every update rule satisfies: accumulators are
/// created lazily on the first step that sees a gradient for a parameter, and
/// `step` applies the per-parameter update to every parameter holding one.
pub trait Optimizer {
    /// Perform a single optimization step
    ///
    /// Fails without touching any parameter if a gradient does not match its
    /// parameter or accumulator, or if the parameter list changed length.
    fn step(&mut self, params: &mut [Tensor]) -> Result<()>;

    /// Zero out all gradients
    fn zero_grad(&mut self, params: &mut [Tensor]) {
        for param in params {
            param.zero_grad();
        }
    }

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Set learning rate
    fn set_lr(&mut self, lr: f32);

    /// Registry name of this optimizer (e.g. `sc_adagrad`)
    fn name(&self) -> &'static str;

    /// Number of completed steps
    fn iterations(&self) -> u64;

    /// Hyperparameters as a config that rebuilds an equivalent optimizer
    fn config(&self) -> OptimSpec;

    /// Snapshot of iterations and accumulators
    fn state(&self) -> OptimizerState;

    /// Restore iterations and accumulators from a snapshot
    fn load_state(&mut self, state: &OptimizerState) -> Result<()>;
}
