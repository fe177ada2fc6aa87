//! Per-parameter accumulator storage shared by the adaptive optimizers

use super::OptimizerState;
use crate::{Error, Result, Tensor};
use ndarray::Array1;

/// One running sum per trainable tensor, created on first use
#[derive(Debug, Clone, Default)]
pub(crate) struct Accumulators {
    slots: Vec<Option<Array1<f32>>>,
}

impl Accumulators {
    /// Collect gradients for this step and check them against the parameters
    /// and any existing accumulators.
    ///
    /// Nothing is mutated beyond sizing the slot list on first use, so a failed
    /// check leaves the optimizer as it was.
    pub(crate) fn prepare(&mut self, params: &[Tensor]) -> Result<Vec<Option<Array1<f32>>>> {
        if self.slots.is_empty() {
            self.slots = vec![None; params.len()];
        } else if self.slots.len() != params.len() {
            return Err(Error::ParameterCountMismatch {
                expected: self.slots.len(),
                got: params.len(),
            });
        }

        let mut grads = Vec::with_capacity(params.len());
        for (param, slot) in params.iter().zip(&self.slots) {
            let grad = param.grad();
            if let Some(g) = &grad {
                if g.len() != param.len() {
                    return Err(Error::ShapeMismatch {
                        expected: vec![param.len()],
                        got: vec![g.len()],
                    });
                }
                if let Some(v) = slot {
                    if v.len() != g.len() {
                        return Err(Error::ShapeMismatch {
                            expected: vec![v.len()],
                            got: vec![g.len()],
                        });
                    }
                }
            }
            grads.push(grad);
        }

        Ok(grads)
    }

    /// Accumulator for parameter `index`, zero-initialized on first access
    pub(crate) fn slot_mut(&mut self, index: usize, len: usize) -> &mut Array1<f32> {
        self.slots[index].get_or_insert_with(|| Array1::zeros(len))
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Array1<f32>> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub(crate) fn to_vecs(&self) -> Vec<Option<Vec<f32>>> {
        self.slots
            .iter()
            .map(|slot| slot.as_ref().map(|v| v.to_vec()))
            .collect()
    }

    pub(crate) fn restore(&mut self, state: &OptimizerState) {
        self.slots = state
            .accumulators
            .iter()
            .map(|slot| slot.as_ref().map(|v| Array1::from(v.clone())))
            .collect();
    }
}

/// State every adaptive optimizer carries besides its own hyperparameters
///
/// Holds the base learning rate, its inverse-time decay, the step counter, and
/// the per-parameter accumulators.
#[derive(Debug, Clone, Default)]
pub(crate) struct AdaptiveCore {
    pub(crate) lr: f32,
    pub(crate) decay: f32,
    pub(crate) iterations: u64,
    accumulators: Accumulators,
}

impl AdaptiveCore {
    pub(crate) fn new(lr: f32) -> Self {
        Self {
            lr,
            ..Self::default()
        }
    }

    /// Check the gradients on `params`, see [`Accumulators::prepare`]
    pub(crate) fn prepare(&mut self, params: &[Tensor]) -> Result<Vec<Option<Array1<f32>>>> {
        self.accumulators.prepare(params)
    }

    /// Learning rate for the step about to run
    pub(crate) fn step_lr(&self) -> f32 {
        inverse_time_decay(self.lr, self.decay, self.iterations)
    }

    /// 1-based index of the step about to run
    pub(crate) fn time_index(&self) -> f32 {
        (self.iterations + 1) as f32
    }

    pub(crate) fn slot_mut(&mut self, index: usize, len: usize) -> &mut Array1<f32> {
        self.accumulators.slot_mut(index, len)
    }

    pub(crate) fn accumulator(&self, index: usize) -> Option<&Array1<f32>> {
        self.accumulators.get(index)
    }

    pub(crate) fn finish_step(&mut self) {
        self.iterations += 1;
    }

    pub(crate) fn state(&self, optimizer: &str) -> OptimizerState {
        OptimizerState::capture(optimizer, self.iterations, &self.accumulators)
    }

    /// Load a snapshot taken by `optimizer`; fails before mutating on a mismatch
    pub(crate) fn load_state(&mut self, optimizer: &str, state: &OptimizerState) -> Result<()> {
        state.ensure_optimizer(optimizer)?;
        self.iterations = state.iterations;
        self.accumulators.restore(state);
        Ok(())
    }
}

/// `Optimizer` methods that only read or write the `core` field
///
/// Expands inside an `impl Optimizer for X` block where `X` has a
/// `core: AdaptiveCore` field and a `NAME` constant.
macro_rules! delegate_to_core {
    () => {
        fn lr(&self) -> f32 {
            self.core.lr
        }

        fn set_lr(&mut self, lr: f32) {
            self.core.lr = lr;
        }

        fn name(&self) -> &'static str {
            Self::NAME
        }

        fn iterations(&self) -> u64 {
            self.core.iterations
        }

        fn state(&self) -> $crate::optim::OptimizerState {
            self.core.state(Self::NAME)
        }

        fn load_state(&mut self, state: &$crate::optim::OptimizerState) -> $crate::Result<()> {
            self.core.load_state(Self::NAME, state)
        }
    };
}

pub(crate) use delegate_to_core;

/// Inverse-time learning rate decay: `lr / (1 + decay * iterations)`
///
/// `iterations` is the number of steps completed before the current one, so
/// the first step always uses the undecayed rate.
pub(crate) fn inverse_time_decay(lr: f32, decay: f32, iterations: u64) -> f32 {
    if decay > 0.0 {
        lr / (1.0 + decay * iterations as f32)
    } else {
        lr
    }
}
