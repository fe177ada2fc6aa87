//! SC-RMSProp optimizer
//!
//! The strongly convex counterpart of the RMSProp variant: same time-varying
//! decay β_t = 1 - γ/t, but step size α/t and a denominator linear in the
//! accumulator, with the SC damping term divided by t:
//!
//! β_t = 1 - γ / t
//! v_t = β_t * v_{t-1} + (1 - β_t) * g²
//! θ_t = θ_{t-1} - (α/t) * g / (v_t + ξ₂ * exp(-ξ₁ * t * v_t) / t)
//!     = θ_{t-1} - α * g / (t * v_t + ξ₂ * exp(-ξ₁ * t * v_t))

use super::accumulator::{delegate_to_core, AdaptiveCore};
use super::Optimizer;
use crate::config::OptimSpec;
use crate::{Result, Tensor};
use ndarray::{Array1, Zip};

/// SC-RMSProp optimizer
///
/// # Default hyperparameters
/// - `lr`: 0.01
/// - `gamma`: 0.9
/// - `xi_1`: 0.1
/// - `xi_2`: 0.1
pub struct SCRMSProp {
    core: AdaptiveCore,
    gamma: f32,
    xi_1: f32,
    xi_2: f32,
}

impl SCRMSProp {
    pub const NAME: &'static str = "sc_rmsprop";

    /// Create a new SC-RMSProp optimizer
    pub fn new(lr: f32, gamma: f32, xi_1: f32, xi_2: f32) -> Self {
        Self {
            core: AdaptiveCore::new(lr),
            gamma,
            xi_1,
            xi_2,
        }
    }

    /// Create with default parameters (γ = 0.9, ξ₁ = ξ₂ = 0.1)
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 0.1, 0.1)
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

impl Default for SCRMSProp {
    fn default() -> Self {
        Self::default_params(0.01)
    }
}

impl Optimizer for SCRMSProp {
    fn step(&mut self, params: &mut [Tensor]) -> Result<()> {
        let grads = self.core.prepare(params)?;
        let lr = self.core.step_lr();
        let t = self.core.time_index();
        let beta = 1.0 - self.gamma / t;
        let (xi_1, xi_2) = (self.xi_1, self.xi_2);

        for (i, (param, grad)) in params.iter_mut().zip(grads).enumerate() {
            let Some(grad) = grad else { continue };
            let v = self.core.slot_mut(i, grad.len());

            Zip::from(param.data_mut())
                .and(v)
                .and(&grad)
                .for_each(|p, v, &g| {
                    *v = beta * *v + (1.0 - beta) * g * g;
                    let tv = t * *v;
                    *p -= lr * g / (tv + xi_2 * (-xi_1 * tv).exp());
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
            .with_param("xi_1", self.xi_1)
            .with_param("xi_2", self.xi_2)
            .with_param("decay", self.core.decay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::SCAdagrad;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    #[test]
    fn test_sc_rmsprop_single_step() {
        let mut params = vec![Tensor::from_vec(vec![1.0], true)];
        let mut optimizer = SCRMSProp::default();

        params[0].set_grad(arr1(&[2.0]));
        optimizer.step(&mut params).unwrap();

        // t = 1, v = 3.6, θ = 1 - 0.01 * 2 / (3.6 + 0.1 * e^{-0.36})
        assert_abs_diff_eq!(optimizer.accumulator(0).unwrap()[0], 3.6, epsilon = 1e-5);
        assert_abs_diff_eq!(params[0].data()[0], 0.994_550_1, epsilon = 1e-6);
    }

    #[test]
    fn test_sc_rmsprop_second_step_scales_by_t() {
        let mut params = vec![Tensor::from_vec(vec![0.0], true)];
        let mut optimizer = SCRMSProp::new(1.0, 1.0, 0.1, 0.1);

        params[0].set_grad(arr1(&[1.0]));
        optimizer.step(&mut params).unwrap();
        let after_first = params[0].data()[0];

        // γ = 1: v_1 = 1, v_2 = 0.5 * 1 + 0.5 * 1 = 1, t·v_2 = 2
        params[0].set_grad(arr1(&[1.0]));
        optimizer.step(&mut params).unwrap();

        let step_1 = 1.0 / (1.0 + 0.1 * (-0.1f32).exp());
        let step_2 = 1.0 / (2.0 + 0.1 * (-0.2f32).exp());
        assert_abs_diff_eq!(after_first, -step_1, epsilon = 1e-6);
        assert_abs_diff_eq!(params[0].data()[0], -step_1 - step_2, epsilon = 1e-6);
    }

    #[test]
    fn test_sc_rmsprop_matches_sc_adagrad_for_gamma_one_on_constant_gradient() {
        // With γ = 1, t * v_t is the running sum of g², i.e. the SC-Adagrad accumulator
        let mut sc_rms_params = vec![Tensor::from_vec(vec![1.0, -2.0], true)];
        let mut sc_ada_params = vec![Tensor::from_vec(vec![1.0, -2.0], true)];
        let mut sc_rms = SCRMSProp::new(0.05, 1.0, 0.1, 0.1);
        let mut sc_ada = SCAdagrad::new(0.05, 0.1, 0.1);

        for _ in 0..10 {
            let grad = arr1(&[0.5, -1.5]);
            sc_rms_params[0].set_grad(grad.clone());
            sc_ada_params[0].set_grad(grad);
            sc_rms.step(&mut sc_rms_params).unwrap();
            sc_ada.step(&mut sc_ada_params).unwrap();
        }

        for (a, b) in sc_rms_params[0].data().iter().zip(sc_ada_params[0].data()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_sc_rmsprop_quadratic_convergence() {
        let mut params = vec![Tensor::from_vec(vec![5.0, -3.0, 2.0], true)];
        let mut optimizer = SCRMSProp::default_params(20.0);

        for _ in 0..200 {
            let grad = params[0].data().mapv(|x| 2.0 * x);
            params[0].set_grad(grad);
            optimizer.step(&mut params).unwrap();
        }

        for &val in params[0].data().iter() {
            assert!(val.abs() < 0.1, "Value {} did not converge", val);
        }
    }
}
