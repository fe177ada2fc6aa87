//! Trainer abstraction for training loops

use super::{MetricsTracker, TrainConfig};
use crate::io::{save_checkpoint, Checkpoint};
use crate::optim::{clip_grad_norm, clip_grad_value, grad_norm, LRScheduler, Optimizer};
use crate::problems::Objective;
use crate::{Error, Result, Tensor};
use std::path::PathBuf;
use std::time::Instant;

/// Result of a training run
#[derive(Debug, Clone)]
pub struct TrainResult {
    /// Steps taken in this call to `fit`
    pub steps: u64,
    /// Loss at the final parameters
    pub final_loss: f32,
    /// Best loss seen, including the final one
    pub best_loss: f32,
    /// Learning rate after the last step
    pub final_lr: f32,
    /// Total training time in seconds
    pub elapsed_secs: f64,
    /// Where the final checkpoint was written, if anywhere
    pub checkpoint: Option<PathBuf>,
}

/// High-level trainer that orchestrates the training loop
///
/// Each step evaluates the objective, stores the gradients on the
/// parameters, clips them, and hands them to the optimizer.
///
/// # Example
///
/// ```no_run
/// use scoptim::optim::SCAdagrad;
/// use scoptim::problems::{Objective, Quadratic};
/// use scoptim::train::{TrainConfig, Trainer};
///
/// let objective = Quadratic::new(vec![1.0, 10.0]);
/// let optimizer = SCAdagrad::default_params(5.0);
///
/// let mut trainer = Trainer::new(objective.init_params(), Box::new(optimizer), TrainConfig::default());
/// let result = trainer.fit(&objective, 100).unwrap();
/// println!("final loss {}", result.final_loss);
/// ```
pub struct Trainer {
    /// Model parameters
    params: Vec<Tensor>,

    /// Optimizer
    optimizer: Box<dyn Optimizer>,

    /// Learning rate scheduler
    scheduler: Option<Box<dyn LRScheduler>>,

    /// Training configuration
    config: TrainConfig,

    /// Metrics tracker
    pub metrics: MetricsTracker,
}

impl Trainer {
    /// Create a new trainer
    pub fn new(params: Vec<Tensor>, optimizer: Box<dyn Optimizer>, config: TrainConfig) -> Self {
        Self {
            params,
            optimizer,
            scheduler: None,
            config,
            metrics: MetricsTracker::new(),
        }
    }

    /// Drive the learning rate from a scheduler
    ///
    /// The scheduler's rate is pushed into the optimizer before every step.
    pub fn set_scheduler(&mut self, scheduler: Box<dyn LRScheduler>) {
        self.scheduler = Some(scheduler);
    }

    /// Get current learning rate
    pub fn lr(&self) -> f32 {
        self.optimizer.lr()
    }

    /// Set learning rate
    pub fn set_lr(&mut self, lr: f32) {
        self.optimizer.set_lr(lr);
    }

    pub fn params(&self) -> &[Tensor] {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut [Tensor] {
        &mut self.params
    }

    pub fn into_params(self) -> Vec<Tensor> {
        self.params
    }

    pub fn optimizer(&self) -> &dyn Optimizer {
        self.optimizer.as_ref()
    }

    /// Snapshot of the optimizer and parameters
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::capture(self.optimizer.as_ref(), &self.params)
    }

    /// Continue from a checkpoint
    ///
    /// Loads the saved iterations and accumulators into the current optimizer
    /// and restores the parameter values. The optimizer keeps its own
    /// hyperparameters, so a learning rate changed since the checkpoint is
    /// honored. A scheduler already set is fast-forwarded to the saved
    /// iteration count. Nothing changes if the checkpoint does not fit, and a
    /// checkpoint from another optimizer fails with `Error::StateMismatch`.
    pub fn resume(&mut self, checkpoint: &Checkpoint) -> Result<()> {
        checkpoint.check_params(&self.params)?;
        self.optimizer.load_state(&checkpoint.state)?;
        checkpoint.restore_params(&mut self.params)?;

        if let Some(scheduler) = self.scheduler.as_mut() {
            for _ in 0..checkpoint.state.iterations {
                scheduler.step();
            }
        }

        tracing::info!(
            optimizer = self.optimizer.name(),
            iterations = self.optimizer.iterations(),
            lr = self.optimizer.lr(),
            "resumed from checkpoint"
        );
        Ok(())
    }

    /// Perform a single training step
    ///
    /// Returns the loss at the parameters before the update. A non-finite loss
    /// fails with `Error::Diverged` and leaves the parameters untouched.
    pub fn train_step(&mut self, objective: &dyn Objective) -> Result<f32> {
        let step = self.optimizer.iterations() + 1;

        self.optimizer.zero_grad(&mut self.params);
        let (loss, grads) = objective.loss_and_grad(&self.params)?;

        if !loss.is_finite() {
            tracing::warn!(step, loss, "loss is not finite, stopping");
            return Err(Error::Diverged { step, loss });
        }

        for (param, grad) in self.params.iter().zip(grads) {
            param.set_grad(grad);
        }

        let norm = match self.config.max_grad_norm {
            Some(max_norm) => clip_grad_norm(&mut self.params, max_norm),
            None => grad_norm(&self.params),
        };
        if let Some(clip) = self.config.clip_value {
            clip_grad_value(&mut self.params, clip);
        }

        if let Some(scheduler) = &self.scheduler {
            scheduler.apply(self.optimizer.as_mut());
        }
        let lr = self.optimizer.lr();

        self.optimizer.step(&mut self.params)?;

        if let Some(scheduler) = self.scheduler.as_mut() {
            scheduler.step();
        }

        self.metrics.record_step(loss, lr, norm);
        Ok(loss)
    }

    /// Run `steps` training steps on `objective`
    ///
    /// Logs progress every `log_interval` steps and writes the configured
    /// checkpoint at the end.
    pub fn fit(&mut self, objective: &dyn Objective, steps: u64) -> Result<TrainResult> {
        let start = Instant::now();
        tracing::info!(
            objective = objective.name(),
            optimizer = self.optimizer.name(),
            lr = self.optimizer.lr(),
            steps,
            "starting training"
        );

        let mut best_loss = f32::INFINITY;
        for _ in 0..steps {
            let loss = self.train_step(objective)?;
            best_loss = best_loss.min(loss);

            let global_step = self.optimizer.iterations();
            if global_step % self.config.log_interval.max(1) == 0 {
                tracing::info!(
                    step = global_step,
                    loss,
                    lr = self.optimizer.lr(),
                    grad_norm = self.metrics.grad_norms.last().copied().unwrap_or(0.0),
                    "training progress"
                );
            }
        }

        let (final_loss, _) = objective.loss_and_grad(&self.params)?;
        if !final_loss.is_finite() {
            let step = self.optimizer.iterations();
            tracing::warn!(step, loss = final_loss, "loss is not finite after training");
            return Err(Error::Diverged {
                step,
                loss: final_loss,
            });
        }
        best_loss = best_loss.min(final_loss);

        let checkpoint = match &self.config.checkpoint_path {
            Some(path) => {
                save_checkpoint(&self.checkpoint().with_loss(final_loss), path)?;
                Some(path.clone())
            }
            None => None,
        };

        let elapsed_secs = start.elapsed().as_secs_f64();
        tracing::info!(
            steps,
            final_loss,
            best_loss,
            elapsed_secs,
            "training finished"
        );

        Ok(TrainResult {
            steps,
            final_loss,
            best_loss,
            final_lr: self.optimizer.lr(),
            elapsed_secs,
            checkpoint,
        })
    }
}
