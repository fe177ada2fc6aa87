//! RMSProp with a time-varying decay rate
//!
//! Stock RMSProp uses a fixed β, so its accumulator never stops forgetting.
//! This variant lets β_t = 1 - γ/t approach one, and pairs it with a step size
//! α/√t and damping δ/√t, which gives √T regret for convex problems:
//!
//! β_t = 1 - γ / t
//! v_t = β_t * v_{t-1} + (1 - β_t) * g²
//! θ_t = θ_{t-1} - (α/√t) * g / (√v_t + δ/√t)
//!     = θ_{t-1} - α * g / (√(t * v_t) + δ)

use super::accumulator::{delegate_to_core, AdaptiveCore};
use super::Optimizer;
use crate::config::OptimSpec;
use crate::{Result, Tensor};
use ndarray::{Array1, Zip};

/// RMSProp variant with β_t = 1 - γ/t
///
/// # Default hyperparameters
/// - `lr`: 0.001
/// - `gamma`: 0.9
/// - `delta`: 1e-8
pub struct RMSPropVariant {
    core: AdaptiveCore,
    gamma: f32,
    delta: f32,
}

impl RMSPropVariant {
    pub const NAME: &'static str = "rmsprop_variant";

    /// Create a new RMSProp variant optimizer
    pub fn new(lr: f32, gamma: f32, delta: f32) -> Self {
        Self {
            core: AdaptiveCore::new(lr),
            gamma,
            delta,
        }
    }

    /// Create with default parameters (γ = 0.9, δ = 1e-8)
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 1e-8)
    }

    /// Set inverse-time learning rate decay
    pub fn with_decay(mut self, decay: f32) -> Self {
        self.core.decay = decay;
        self
    }

    /// Moving average of squared gradients for parameter `index`
    pub fn accumulator(&self, index: usize) -> Option<&Array1<f32>> {
        self.core.accumulator(index)
    }
}

impl Optimizer for RMSPropVariant {
    fn step(&mut self, params: &mut [Tensor]) -> Result<()> {
        let grads = self.core.prepare(params)?;
        let lr = self.core.step_lr();
        let t = self.core.time_index();
        let beta = 1.0 - self.gamma / t;
        let delta = self.delta;

        for (i, (param, grad)) in params.iter_mut().zip(grads).enumerate() {
            let Some(grad) = grad else { continue };
            let v = self.core.slot_mut(i, grad.len());

            Zip::from(param.data_mut())
                .and(v)
                .and(&grad)
                .for_each(|p, v, &g| {
                    *v = beta * *v + (1.0 - beta) * g * g;
                    *p -= lr * g / ((t * *v).sqrt() + delta);
                });

            param.apply_constraint();
        }

        self.core.finish_step();
        Ok(())
    }

    delegate_to_core!();

    fn config(&self) -> OptimSpec {
        OptimSpec::new(Self::NAME, self.core.lr)
            .with_param("gamma", self.gamma)
            .with_param("delta", self.delta)
            .with_param("decay", self.core.decay)
    }
}
