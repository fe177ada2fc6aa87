//! Parameter constraints applied after each update
//!
//! A constraint projects a parameter back onto a feasible set once the
//! optimizer has written the new values, e.g. `θ ← P(θ - lr * update)`.

use ndarray::Array1;

const NORM_EPSILON: f32 = 1e-7;

/// Projection applied to a parameter after its update
pub trait Constraint {
    /// Project `data` in place
    fn apply(&self, data: &mut Array1<f32>);

    /// Short name used in debug output
    fn name(&self) -> &'static str;
}

/// Clamp every element to be non-negative
#[derive(Debug, Clone, Copy, Default)]
pub struct NonNeg;

impl Constraint for NonNeg {
    fn apply(&self, data: &mut Array1<f32>) {
        data.mapv_inplace(|x| x.max(0.0));
    }

    fn name(&self) -> &'static str {
        "non_neg"
    }
}

/// Rescale so the L2 norm does not exceed `max_value`
///
/// A negative bound projects onto zero. A NaN bound leaves the data as it is.
#[derive(Debug, Clone, Copy)]
pub struct MaxNorm {
    max_value: f32,
}

impl MaxNorm {
    pub fn new(max_value: f32) -> Self {
        Self { max_value }
    }
}

impl Constraint for MaxNorm {
    fn apply(&self, data: &mut Array1<f32>) {
        let norm = l2_norm(data);
        let desired = norm.min(self.max_value).max(0.0);
        let scale = desired / (NORM_EPSILON + norm);
        data.mapv_inplace(|x| x * scale);
    }

    fn name(&self) -> &'static str {
        "max_norm"
    }
}

/// Rescale to unit L2 norm
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitNorm;

impl Constraint for UnitNorm {
    fn apply(&self, data: &mut Array1<f32>) {
        let norm = l2_norm(data);
        data.mapv_inplace(|x| x / (NORM_EPSILON + norm));
    }

    fn name(&self) -> &'static str {
        "unit_norm"
    }
}

/// Clamp every element to `[min, max]`
#[derive(Debug, Clone, Copy)]
pub struct ValueRange {
    min: f32,
    max: f32,
}

impl ValueRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

impl Constraint for ValueRange {
    fn apply(&self, data: &mut Array1<f32>) {
        let (min, max) = (self.min, self.max);
        data.mapv_inplace(|x| x.max(min).min(max));
    }

    fn name(&self) -> &'static str {
        "value_range"
    }
}

fn l2_norm(data: &Array1<f32>) -> f32 {
    data.iter().map(|&x| x * x).sum::<f32>().sqrt()
}
