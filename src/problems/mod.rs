//! Closed-form objectives for exercising the optimizers
//!
//! Each objective supplies its own gradients, so no autograd is needed to
//! compare update rules on strongly convex (quadratic, logistic regression)
//! and non-convex (Rosenbrock) landscapes.

mod logistic;
mod quadratic;
mod rosenbrock;

pub use logistic::LogisticRegression;
pub use quadratic::Quadratic;
pub use rosenbrock::Rosenbrock;

use crate::config::ProblemSpec;
use crate::{Error, Result, Tensor};
use ndarray::Array1;

/// A differentiable objective over a fixed list of parameter tensors
pub trait Objective {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fresh parameters at the objective's starting point
    fn init_params(&self) -> Vec<Tensor>;

    /// Loss at `params` and one gradient per parameter tensor
    fn loss_and_grad(&self, params: &[Tensor]) -> Result<(f32, Vec<Array1<f32>>)>;
}

/// Build an objective from its specification
pub fn build_objective(spec: &ProblemSpec) -> Result<Box<dyn Objective>> {
    let objective: Box<dyn Objective> = match spec {
        ProblemSpec::Quadratic { scales, start } => {
            let quadratic = Quadratic::new(scales.clone());
            match start {
                Some(start) => Box::new(quadratic.with_start(start.clone())?),
                None => Box::new(quadratic),
            }
        }
        ProblemSpec::Rosenbrock { a, b, start } => {
            let rosenbrock = Rosenbrock::new(*a, *b);
            match start {
                Some(start) => Box::new(rosenbrock.with_start(*start)),
                None => Box::new(rosenbrock),
            }
        }
        ProblemSpec::Logistic {
            samples,
            features,
            l2,
            seed,
        } => Box::new(LogisticRegression::synthetic(*samples, *features, *l2, *seed)),
    };

    Ok(objective)
}

/// Check that `params` has the expected tensor lengths
pub(crate) fn check_shapes(params: &[Tensor], expected: &[usize]) -> Result<()> {
    if params.len() != expected.len() {
        return Err(Error::ParameterCountMismatch {
            expected: expected.len(),
            got: params.len(),
        });
    }

    for (param, &len) in params.iter().zip(expected) {
        if param.len() != len {
            return Err(Error::ShapeMismatch {
                expected: vec![len],
                got: vec![param.len()],
            });
        }
    }

    Ok(())
}
