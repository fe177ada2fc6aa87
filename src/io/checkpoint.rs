//! Checkpoint: optimizer config + state + parameter values

use crate::config::{build_optimizer, OptimSpec};
use crate::optim::{Optimizer, OptimizerState};
use crate::{Error, Result, Tensor};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Everything needed to continue a run where it stopped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Optimizer hyperparameters
    pub optimizer: OptimSpec,

    /// Optimizer iterations and accumulators
    pub state: OptimizerState,

    /// Parameter values, one vector per tensor
    pub params: Vec<Vec<f32>>,

    /// Loss at the time of the snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss: Option<f32>,
}

impl Checkpoint {
    /// Snapshot an optimizer and the parameters it trains
    pub fn capture(optimizer: &dyn Optimizer, params: &[Tensor]) -> Self {
        Self {
            optimizer: optimizer.config(),
            state: optimizer.state(),
            params: params.iter().map(|p| p.data().to_vec()).collect(),
            loss: None,
        }
    }

    pub fn with_loss(mut self, loss: f32) -> Self {
        self.loss = Some(loss);
        self
    }

    /// Rebuild the optimizer with its saved state loaded
    pub fn build_optimizer(&self) -> Result<Box<dyn Optimizer>> {
        let mut optimizer = build_optimizer(&self.optimizer)?;
        optimizer.load_state(&self.state)?;
        tracing::debug!(
            optimizer = optimizer.name(),
            iterations = self.state.iterations,
            "restored optimizer state"
        );
        Ok(optimizer)
    }

    /// Copy the saved values into `params`
    ///
    /// Nothing is written unless every tensor length matches.
    pub fn restore_params(&self, params: &mut [Tensor]) -> Result<()> {
        self.check_params(params)?;
        for (saved, param) in self.params.iter().zip(params.iter_mut()) {
            *param.data_mut() = Array1::from(saved.clone());
        }

        Ok(())
    }

    /// Fail unless the saved values fit `params` tensor for tensor
    pub fn check_params(&self, params: &[Tensor]) -> Result<()> {
        if self.params.len() != params.len() {
            return Err(Error::ParameterCountMismatch {
                expected: self.params.len(),
                got: params.len(),
            });
        }

        for (saved, param) in self.params.iter().zip(params.iter()) {
            if saved.len() != param.len() {
                return Err(Error::ShapeMismatch {
                    expected: vec![saved.len()],
                    got: vec![param.len()],
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::{SCAdagrad, SCRMSProp};
    use ndarray::arr1;

    fn trained_sc_adagrad() -> (SCAdagrad, Vec<Tensor>) {
        let mut optimizer = SCAdagrad::default_params(0.5);
        let mut params = vec![Tensor::from_vec(vec![1.0, 2.0], true), Tensor::zeros(1, true)];
        params[0].set_grad(arr1(&[0.5, -0.5]));
        optimizer.step(&mut params).unwrap();
        (optimizer, params)
    }

    #[test]
    fn test_capture() {
        let (optimizer, params) = trained_sc_adagrad();
        let checkpoint = Checkpoint::capture(&optimizer, &params).with_loss(1.5);

        assert_eq!(checkpoint.optimizer.name, "sc_adagrad");
        assert_eq!(checkpoint.state.iterations, 1);
        assert_eq!(checkpoint.state.initialized_slots(), 1);
        assert_eq!(checkpoint.params.len(), 2);
        assert_eq!(checkpoint.params[0], params[0].data().to_vec());
        assert_eq!(checkpoint.loss, Some(1.5));
    }

    #[test]
    fn test_build_optimizer_restores_state() {
        let (optimizer, params) = trained_sc_adagrad();
        let checkpoint = Checkpoint::capture(&optimizer, &params);

        let restored = checkpoint.build_optimizer().unwrap();
        assert_eq!(restored.iterations(), 1);
        assert_eq!(restored.state(), optimizer.state());
    }

    #[test]
    fn test_build_optimizer_rejects_mismatched_state() {
        let (optimizer, params) = trained_sc_adagrad();
        let mut checkpoint = Checkpoint::capture(&optimizer, &params);
        checkpoint.optimizer = SCRMSProp::default().config();

        assert!(matches!(
            checkpoint.build_optimizer(),
            Err(Error::StateMismatch { .. })
        ));
    }

    #[test]
    fn test_restore_params() {
        let (optimizer, params) = trained_sc_adagrad();
        let checkpoint = Checkpoint::capture(&optimizer, &params);

        let mut fresh = vec![Tensor::zeros(2, true), Tensor::zeros(1, true)];
        checkpoint.restore_params(&mut fresh).unwrap();
        assert_eq!(fresh[0].data(), params[0].data());
    }

    #[test]
    fn test_restore_params_checks_every_shape_first() {
        let (optimizer, params) = trained_sc_adagrad();
        let checkpoint = Checkpoint::capture(&optimizer, &params);

        let mut wrong = vec![Tensor::zeros(2, true), Tensor::zeros(3, true)];
        assert!(matches!(
            checkpoint.restore_params(&mut wrong),
            Err(Error::ShapeMismatch { .. })
        ));
        assert_eq!(wrong[0].data().to_vec(), vec![0.0, 0.0]);

        let mut short = vec![Tensor::zeros(2, true)];
        assert!(matches!(
            checkpoint.restore_params(&mut short),
            Err(Error::ParameterCountMismatch { .. })
        ));
    }
}
