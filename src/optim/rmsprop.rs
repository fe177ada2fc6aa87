//! RMSProp optimizer

use super::accumulator::{delegate_to_core, AdaptiveCore};
use super::Optimizer;
use crate::config::OptimSpec;
use crate::{Result, Tensor};
use ndarray::{Array1, Zip};

/// RMSProp optimizer
///
/// Keeps an exponential moving average of squared gradients with a fixed
/// decay rate ρ:
///
/// v_t = ρ * v_{t-1} + (1 - ρ) * g²
/// θ_t = θ_{t-1} - lr * g / (√v_t + ε)
pub struct RMSProp {
    core: AdaptiveCore,
    rho: f32,
    epsilon: f32,
}

impl RMSProp {
    pub const NAME: &'static str = "rmsprop";

    /// Create a new RMSProp optimizer
    pub fn new(lr: f32, rho: f32, epsilon: f32) -> Self {
        Self {
            core: AdaptiveCore::new(lr),
            rho,
            epsilon,
        }
    }

    /// Create RMSProp with default parameters (ρ = 0.9, ε = 1e-7)
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 1e-7)
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

impl Optimizer for RMSProp {
    fn step(&mut self, params: &mut [Tensor]) -> Result<()> {
        let grads = self.core.prepare(params)?;
        let lr = self.core.step_lr();
        let (rho, epsilon) = (self.rho, self.epsilon);

        for (i, (param, grad)) in params.iter_mut().zip(grads).enumerate() {
            let Some(grad) = grad else { continue };
            let v = self.core.slot_mut(i, grad.len());

            Zip::from(param.data_mut())
                .and(v)
                .and(&grad)
                .for_each(|p, v, &g| {
                    *v = rho * *v + (1.0 - rho) * g * g;
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
            .with_param("rho", self.rho)
            .with_param("epsilon", self.epsilon)
            .with_param("decay", self.core.decay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    #[test]
    fn test_rmsprop_single_step() {
        let mut params = vec![Tensor::from_vec(vec![1.0], true)];
        let mut optimizer = RMSProp::default_params(0.01);

        params[0].set_grad(arr1(&[2.0]));
        optimizer.step(&mut params).unwrap();

        // v = 0.1 * 4 = 0.4, θ = 1 - 0.01 * 2 / √0.4
        assert_abs_diff_eq!(optimizer.accumulator(0).unwrap()[0], 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(params[0].data()[0], 0.968_377_2, epsilon = 1e-6);
    }

    #[test]
    fn test_rmsprop_moving_average_forgets() {
        let mut params = vec![Tensor::from_vec(vec![0.0], true)];
        let mut optimizer = RMSProp::new(0.01, 0.5, 1e-7);

        params[0].set_grad(arr1(&[4.0]));
        optimizer.step(&mut params).unwrap();
        params[0].set_grad(arr1(&[0.0]));
        optimizer.step(&mut params).unwrap();

        // 0.5 * (0.5 * 16) = 4
        assert_abs_diff_eq!(optimizer.accumulator(0).unwrap()[0], 4.0, epsilon = 1e-6);
    }
}
