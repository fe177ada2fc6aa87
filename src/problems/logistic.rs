//! L2-regularized logistic regression on seeded synthetic data

use super::{check_shapes, Objective};
use crate::{Result, Tensor};
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Binary logistic regression with weights and a bias
///
/// Loss is the mean log-loss plus `l2/2 · ||w||²` on the weights (the bias is
/// not penalized). With `l2 > 0` the loss is strongly convex in the weights.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    features: Array2<f32>,
    labels: Array1<f32>,
    l2: f32,
}

impl LogisticRegression {
    /// Logistic regression over the given design matrix and 0/1 labels
    pub fn new(features: Array2<f32>, labels: Array1<f32>, l2: f32) -> Self {
        Self {
            features,
            labels,
            l2,
        }
    }

    /// Draw features uniformly from [-1, 1] and labels from a random linear
    /// model, reproducibly for a given seed
    pub fn synthetic(samples: usize, features: usize, l2: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let true_weights: Array1<f32> =
            Array1::from_shape_fn(features, |_| rng.gen_range(-2.0f32..2.0));
        let x = Array2::from_shape_fn((samples, features), |_| rng.gen_range(-1.0f32..1.0));

        let logits = x.dot(&true_weights);
        let labels = logits.mapv(|z| {
            let u: f32 = rng.gen();
            if sigmoid(z) > u {
                1.0
            } else {
                0.0
            }
        });

        Self::new(x, labels, l2)
    }

    pub fn samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }
}

fn sigmoid(z: f32) -> f32 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

// log(1 + e^z) without overflow
fn softplus(z: f32) -> f32 {
    z.max(0.0) + (-z.abs()).exp().ln_1p()
}

impl Objective for LogisticRegression {
    fn name(&self) -> &str {
        "logistic"
    }

    fn init_params(&self) -> Vec<Tensor> {
        vec![
            Tensor::zeros(self.num_features(), true),
            Tensor::zeros(1, true),
        ]
    }

    fn loss_and_grad(&self, params: &[Tensor]) -> Result<(f32, Vec<Array1<f32>>)> {
        check_shapes(params, &[self.num_features(), 1])?;
        let w = params[0].data();
        let b = params[1].data()[0];
        let n = self.samples().max(1) as f32;

        let logits = self.features.dot(w) + b;

        let data_loss = logits
            .iter()
            .zip(self.labels.iter())
            .map(|(&z, &y)| softplus(z) - y * z)
            .sum::<f32>()
            / n;
        let loss = data_loss + 0.5 * self.l2 * w.dot(w);

        let residual = logits.mapv(sigmoid) - &self.labels;
        let grad_w = self.features.t().dot(&residual) / n + self.l2 * w;
        let grad_b = Array1::from_elem(1, residual.sum() / n);

        Ok((loss, vec![grad_w, grad_b]))
    }
}
