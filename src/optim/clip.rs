//! Gradient clipping
//!
//! Two strategies, applied to the gradients held by the parameters before the
//! optimizer step:
//!   1. Clip by norm: scale all gradients so their global L2 norm ≤ max_norm
//!   2. Clip by value: clamp each gradient element to [-max_value, max_value]

use crate::Tensor;

/// Global L2 norm of all gradients currently set on `params`
pub fn grad_norm(params: &[Tensor]) -> f32 {
    params
        .iter()
        .filter_map(Tensor::grad)
        .map(|g| g.iter().map(|&x| x * x).sum::<f32>())
        .sum::<f32>()
        .sqrt()
}

/// Clip gradients by their global L2 norm
///
/// If the total norm exceeds `max_norm`, every gradient is scaled by
/// `max_norm / total_norm`. Returns the norm measured before clipping.
/// A negative or NaN `max_norm` leaves the gradients untouched.
pub fn clip_grad_norm(params: &mut [Tensor], max_norm: f32) -> f32 {
    let total_norm = grad_norm(params);
    if !is_valid_bound(max_norm) || total_norm <= max_norm || total_norm == 0.0 {
        return total_norm;
    }

    let scale = max_norm / total_norm;
    for param in params.iter() {
        if let Some(grad) = param.grad() {
            param.set_grad(grad * scale);
        }
    }

    total_norm
}

/// Clamp each gradient element to `[-max_value, max_value]`
///
/// A negative or NaN `max_value` leaves the gradients untouched.
pub fn clip_grad_value(params: &mut [Tensor], max_value: f32) {
    if !is_valid_bound(max_value) {
        return;
    }

    for param in params.iter() {
        if let Some(grad) = param.grad() {
            param.set_grad(grad.mapv(|g| g.max(-max_value).min(max_value)));
        }
    }
}

fn is_valid_bound(bound: f32) -> bool {
    bound >= 0.0
}
