//! Learning rate schedulers

use super::Optimizer;
use std::f32::consts::PI;

/// Learning rate scheduler trait
pub trait LRScheduler {
    /// Get the current learning rate
    fn get_lr(&self) -> f32;

    /// Step the scheduler (called after each optimizer step)
    fn step(&mut self);

    /// Push the current learning rate into an optimizer
    fn apply(&self, optimizer: &mut dyn Optimizer) {
        optimizer.set_lr(self.get_lr());
    }
}

/// Cosine Annealing Learning Rate Scheduler
///
/// Formula: lr_t = lr_min + 0.5 * (lr_max - lr_min) * (1 + cos(π * t / T))
///
/// Stays at `lr_min` once `t >= T`.
#[derive(Debug, Clone)]
pub struct CosineAnnealingLR {
    lr_max: f32,
    lr_min: f32,
    t_max: usize,
    current_step: usize,
}

impl CosineAnnealingLR {
    /// Create a new cosine annealing scheduler
    ///
    /// # Arguments
    /// * `lr_max` - Initial (maximum) learning rate
    /// * `t_max` - Total number of steps for the schedule
    /// * `lr_min` - Minimum learning rate
    pub fn new(lr_max: f32, t_max: usize, lr_min: f32) -> Self {
        Self {
            lr_max,
            lr_min,
            t_max,
            current_step: 0,
        }
    }

    /// Create scheduler with lr_min = 0
    pub fn default_min(lr_max: f32, t_max: usize) -> Self {
        Self::new(lr_max, t_max, 0.0)
    }
}

impl LRScheduler for CosineAnnealingLR {
    fn get_lr(&self) -> f32 {
        if self.current_step >= self.t_max {
            return self.lr_min;
        }

        let progress = self.current_step as f32 / self.t_max as f32;
        let cosine_decay = 0.5 * (1.0 + (PI * progress).cos());
        self.lr_min + (self.lr_max - self.lr_min) * cosine_decay
    }

    fn step(&mut self) {
        self.current_step += 1;
    }
}

/// Polynomial inverse-time schedule
///
/// Formula: lr_t = lr_0 / (1 + rate * t)^power
///
/// `power = 1` gives the α/t step size of SC-RMSProp, `power = 0.5` the α/√t
/// step size of the RMSProp variant, for use with optimizers that do not
/// build the schedule in.
#[derive(Debug, Clone)]
pub struct InverseTimeLR {
    lr_0: f32,
    rate: f32,
    power: f32,
    current_step: usize,
}

impl InverseTimeLR {
    pub fn new(lr_0: f32, rate: f32, power: f32) -> Self {
        Self {
            lr_0,
            rate,
            power,
            current_step: 0,
        }
    }
}

impl LRScheduler for InverseTimeLR {
    fn get_lr(&self) -> f32 {
        self.lr_0 / (1.0 + self.rate * self.current_step as f32).powf(self.power)
    }

    fn step(&mut self) {
        self.current_step += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optim::SCAdagrad;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cosine_annealing_endpoints() {
        let mut scheduler = CosineAnnealingLR::new(1.0, 100, 0.1);
        assert_abs_diff_eq!(scheduler.get_lr(), 1.0, epsilon = 1e-6);

        for _ in 0..100 {
            scheduler.step();
        }
        assert_abs_diff_eq!(scheduler.get_lr(), 0.1, epsilon = 1e-6);

        for _ in 0..10 {
            scheduler.step();
        }
        assert_abs_diff_eq!(scheduler.get_lr(), 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_cosine_annealing_midpoint() {
        let mut scheduler = CosineAnnealingLR::default_min(1.0, 100);
        for _ in 0..50 {
            scheduler.step();
        }
        assert_abs_diff_eq!(scheduler.get_lr(), 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_cosine_annealing_decreases_monotonically() {
        let mut scheduler = CosineAnnealingLR::new(1.0, 100, 0.0);
        let mut prev_lr = scheduler.get_lr();

        for _ in 0..100 {
            scheduler.step();
            let current_lr = scheduler.get_lr();
            assert!(
                current_lr <= prev_lr,
                "Learning rate should decrease monotonically: prev={}, current={}",
                prev_lr,
                current_lr
            );
            prev_lr = current_lr;
        }
    }

    #[test]
    fn test_inverse_time_powers() {
        let mut harmonic = InverseTimeLR::new(1.0, 1.0, 1.0);
        let mut root = InverseTimeLR::new(1.0, 1.0, 0.5);
        for _ in 0..3 {
            harmonic.step();
            root.step();
        }
        assert_abs_diff_eq!(harmonic.get_lr(), 0.25, epsilon = 1e-6);
        assert_abs_diff_eq!(root.get_lr(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_scheduler_drives_optimizer() {
        let mut optimizer = SCAdagrad::default_params(1.0);
        let mut scheduler = CosineAnnealingLR::default_min(1.0, 10);

        scheduler.apply(&mut optimizer);
        assert_abs_diff_eq!(optimizer.lr(), 1.0, epsilon = 1e-6);

        scheduler.step();
        scheduler.apply(&mut optimizer);
        assert!(optimizer.lr() < 1.0);
    }
}
