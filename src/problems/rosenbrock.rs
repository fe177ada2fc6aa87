//! Rosenbrock function f(x, y) = (a - x)² + b (y - x²)²

use super::{check_shapes, Objective};
use crate::{Result, Tensor};
use ndarray::{arr1, Array1};

/// Non-convex banana valley with its minimum 0 at (a, a²)
#[derive(Debug, Clone)]
pub struct Rosenbrock {
    a: f32,
    b: f32,
    start: [f32; 2],
}

impl Rosenbrock {
    pub fn new(a: f32, b: f32) -> Self {
        Self {
            a,
            b,
            start: [-1.5, 2.0],
        }
    }

    pub fn with_start(mut self, start: [f32; 2]) -> Self {
        self.start = start;
        self
    }

    /// Location of the global minimum
    pub fn minimizer(&self) -> [f32; 2] {
        [self.a, self.a * self.a]
    }
}

impl Objective for Rosenbrock {
    fn name(&self) -> &str {
        "rosenbrock"
    }

    fn init_params(&self) -> Vec<Tensor> {
        vec![Tensor::from_vec(self.start.to_vec(), true)]
    }

    fn loss_and_grad(&self, params: &[Tensor]) -> Result<(f32, Vec<Array1<f32>>)> {
        check_shapes(params, &[2])?;
        let (x, y) = (params[0].data()[0], params[0].data()[1]);

        let r = y - x * x;
        let loss = (self.a - x).powi(2) + self.b * r * r;
        let dx = -2.0 * (self.a - x) - 4.0 * self.b * x * r;
        let dy = 2.0 * self.b * r;
        Ok((loss, vec![arr1(&[dx, dy])]))
    }
}
