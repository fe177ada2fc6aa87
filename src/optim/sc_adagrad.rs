//! SC-Adagrad optimizer
//!
//! Adagrad for strongly convex objectives (Mukkamala & Hein, 2017). The step is
//! divided by the accumulated squared gradients themselves instead of their
//! square root, which yields logarithmic regret when the loss is strongly
//! convex. A vanishing damping term keeps the denominator positive while the
//! accumulator is still small:
//!
//! v_t = v_{t-1} + g²
//! δ_t = ξ₂ * exp(-ξ₁ * v_t)
//! θ_t = θ_{t-1} - lr * g / (v_t + δ_t)
//!
//! Reference: "Variants of RMSProp and Adagrad with Logarithmic Regret Bounds",
//! <http://arxiv.org/abs/1706.05507>

use super::accumulator::{delegate_to_core, AdaptiveCore};
use super::Optimizer;
use crate::config::OptimSpec;
use crate::{Result, Tensor};
use ndarray::{Array1, Zip};

/// SC-Adagrad optimizer
///
/// # Default hyperparameters
/// - `lr`: 0.01
/// - `xi_1`: 0.1
/// - `xi_2`: 0.1
/// - `decay`: 0.0
pub struct SCAdagrad {
    core: AdaptiveCore,
    xi_1: f32,
    xi_2: f32,
}

impl SCAdagrad {
    pub const NAME: &'static str = "sc_adagrad";

    /// Create a new SC-Adagrad optimizer
    pub fn new(lr: f32, xi_1: f32, xi_2: f32) -> Self {
        Self {
            core: AdaptiveCore::new(lr),
            xi_1,
            xi_2,
        }
    }

    /// Create SC-Adagrad with the paper's defaults (ξ₁ = ξ₂ = 0.1)
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.1, 0.1)
    }

    /// Set inverse-time learning rate decay
    pub fn with_decay(mut self, decay: f32) -> Self {
        self.core.decay = decay;
        self
    }

    /// Learning rate the next step will use
    pub fn effective_lr(&self) -> f32 {
        self.core.step_lr()
    }

    /// Sum of squared gradients for parameter `index`
    pub fn accumulator(&self, index: usize) -> Option<&Array1<f32>> {
        self.core.accumulator(index)
    }
}

impl Default for SCAdagrad {
    fn default() -> Self {
        Self::default_params(0.01)
    }
}

impl Optimizer for SCAdagrad {
    fn step(&mut self, params: &mut [Tensor]) -> Result<()> {
        let grads = self.core.prepare(params)?;
        let lr = self.effective_lr();
        let (xi_1, xi_2) = (self.xi_1, self.xi_2);

        for (i, (param, grad)) in params.iter_mut().zip(grads).enumerate() {
            let Some(grad) = grad else { continue };
            let v = self.core.slot_mut(i, grad.len());

            Zip::from(param.data_mut())
                .and(v)
                .and(&grad)
                .for_each(|p, v, &g| {
                    *v += g * g;
                    let damping = xi_2 * (-xi_1 * *v).exp();
                    *p -= lr * g / (*v + damping);
                });

            param.apply_constraint();
        }

        self.core.finish_step();
        Ok(())
    }

    delegate_to_core!();

    fn config(&self) -> OptimSpec {
        OptimSpec::new(Self::NAME, self.core.lr)
            .with_param("xi_1", self.xi_1)
            .with_param("xi_2", self.xi_2)
            .with_param("decay", self.core.decay)
    }
}
