//! Adagrad optimizer

use super::accumulator::{delegate_to_core, AdaptiveCore};
use super::Optimizer;
use crate::config::OptimSpec;
use crate::{Result, Tensor};
use ndarray::{Array1, Zip};

/// Adagrad optimizer
///
/// Scales each step by the root of the running sum of squared gradients:
///
/// v_t = v_{t-1} + g²
/// θ_t = θ_{t-1} - lr * g / (√v_t + ε)
pub struct Adagrad {
    core: AdaptiveCore,
    epsilon: f32,
}

impl Adagrad {
    pub const NAME: &'static str = "adagrad";

    /// Create a new Adagrad optimizer
    pub fn new(lr: f32, epsilon: f32) -> Self {
        Self {
            core: AdaptiveCore::new(lr),
            epsilon,
        }
    }

    /// Create Adagrad with default parameters (ε = 1e-7)
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 1e-7)
    }

    /// Set inverse-time learning rate decay
    pub fn with_decay(mut self, decay: f32) -> Self {
        self.core.decay = decay;
        self
    }

    /// Sum of squared gradients for parameter `index`
    pub fn accumulator(&self, index: usize) -> Option<&Array1<f32>> {
        self.core.accumulator(index)
    }
}

impl Optimizer for Adagrad {
    fn step(&mut self, params: &mut [Tensor]) -> Result<()> {
        let grads = self.core.prepare(params)?;
        let lr = self.core.step_lr();
        let epsilon = self.epsilon;

        for (i, (param, grad)) in params.iter_mut().zip(grads).enumerate() {
            let Some(grad) = grad else { continue };
            let v = self.core.slot_mut(i, grad.len());

            Zip::from(param.data_mut())
                .and(v)
                .and(&grad)
                .for_each(|p, v, &g| {
                    *v += g * g;
                    *p -= lr * g / (v.sqrt() + epsilon);
                });

            param.apply_constraint();
        }

        self.core.finish_step();
        Ok(())
    }

    delegate_to_core!();

    fn config(&self) -> OptimSpec {
        OptimSpec::new(Self::NAME, self.core.lr)
            .with_param("epsilon", self.epsilon)
            .with_param("decay", self.core.decay)
    }
}
