//! Diagonal quadratic f(x) = Σ c_i x_i²

use super::{check_shapes, Objective};
use crate::{Error, Result, Tensor};
use ndarray::Array1;

/// Separable quadratic with per-coordinate curvature
///
/// Strongly convex with modulus 2·min(c). Large ratios between scales make
/// it ill-conditioned for plain gradient descent.
#[derive(Debug, Clone)]
pub struct Quadratic {
    scales: Array1<f32>,
    start: Array1<f32>,
}

impl Quadratic {
    /// Quadratic starting from all ones
    pub fn new(scales: Vec<f32>) -> Self {
        let n = scales.len();
        Self {
            scales: Array1::from(scales),
            start: Array1::ones(n),
        }
    }

    pub fn with_start(mut self, start: Vec<f32>) -> Result<Self> {
        if start.len() != self.scales.len() {
            return Err(Error::ShapeMismatch {
                expected: vec![self.scales.len()],
                got: vec![start.len()],
            });
        }
        self.start = Array1::from(start);
        Ok(self)
    }

    pub fn dim(&self) -> usize {
        self.scales.len()
    }
}

impl Objective for Quadratic {
    fn name(&self) -> &str {
        "quadratic"
    }

    fn init_params(&self) -> Vec<Tensor> {
        vec![Tensor::new(self.start.clone(), true)]
    }

    fn loss_and_grad(&self, params: &[Tensor]) -> Result<(f32, Vec<Array1<f32>>)> {
        check_shapes(params, &[self.dim()])?;
        let x = params[0].data();

        let loss = (&self.scales * x * x).sum();
        let grad = 2.0 * &self.scales * x;
        Ok((loss, vec![grad]))
    }
}
