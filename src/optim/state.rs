//! Serializable optimizer state for checkpoint save/load

use super::accumulator::Accumulators;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Snapshot of an optimizer's mutable state
///
/// Holds the step counter and one accumulator per parameter slot. A slot is
/// `None` when its parameter has not received a gradient yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerState {
    /// Registry name of the optimizer that produced this state
    pub optimizer: String,

    /// Completed steps
    pub iterations: u64,

    /// Accumulators, indexed like the parameter list
    pub accumulators: Vec<Option<Vec<f32>>>,
}

impl OptimizerState {
    pub(crate) fn capture(optimizer: &str, iterations: u64, accumulators: &Accumulators) -> Self {
        Self {
            optimizer: optimizer.to_string(),
            iterations,
            accumulators: accumulators.to_vecs(),
        }
    }

    /// Fail unless this state was produced by `expected`
    pub(crate) fn ensure_optimizer(&self, expected: &str) -> Result<()> {
        if self.optimizer != expected {
            return Err(Error::StateMismatch {
                expected: expected.to_string(),
                found: self.optimizer.clone(),
            });
        }
        Ok(())
    }

    /// Number of parameter slots that hold an accumulator
    pub fn initialized_slots(&self) -> usize {
        self.accumulators.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_optimizer_rejects_other_names() {
        let state = OptimizerState {
            optimizer: "sc_adagrad".to_string(),
            iterations: 3,
            accumulators: vec![Some(vec![1.0]), None],
        };

        assert!(state.ensure_optimizer("sc_adagrad").is_ok());
        let err = state.ensure_optimizer("sc_rmsprop").unwrap_err();
        assert!(err.to_string().contains("sc_adagrad"));
        assert_eq!(state.initialized_slots(), 1);
    }

    #[test]
    fn test_state_json_shape() {
        let state = OptimizerState {
            optimizer: "adagrad".to_string(),
            iterations: 1,
            accumulators: vec![Some(vec![4.0]), None],
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["optimizer"], "adagrad");
        assert_eq!(json["iterations"], 1);
        assert!(json["accumulators"][1].is_null());
    }
}
