//! Build training components from configuration

use super::schema::{OptimSpec, TrainingParams};
use super::validate::validate_optim_spec;
use crate::error::{Error, Result};
use crate::optim::{
    Adagrad, CosineAnnealingLR, InverseTimeLR, LRScheduler, Optimizer, RMSProp, RMSPropVariant,
    SCAdagrad, SCRMSProp,
};

/// Build optimizer from configuration
///
/// The spec is validated first, so a built optimizer always has in-range
/// hyperparameters. Missing hyperparameters take the optimizer's defaults.
pub fn build_optimizer(spec: &OptimSpec) -> Result<Box<dyn Optimizer>> {
    validate_optim_spec(spec).map_err(|e| Error::ConfigError(format!("Invalid optimizer: {e}")))?;

    let get = |key: &str, default: f32| spec.param(key).unwrap_or(default);
    let decay = get("decay", 0.0);
    let name = spec.canonical_name();

    let optimizer: Box<dyn Optimizer> = match name.as_str() {
        "adagrad" => Box::new(Adagrad::new(spec.lr, get("epsilon", 1e-7)).with_decay(decay)),
        "rmsprop" => Box::new(
            RMSProp::new(spec.lr, get("rho", 0.9), get("epsilon", 1e-7)).with_decay(decay),
        ),
        "sc_adagrad" => Box::new(
            SCAdagrad::new(spec.lr, get("xi_1", 0.1), get("xi_2", 0.1)).with_decay(decay),
        ),
        "rmsprop_variant" => Box::new(
            RMSPropVariant::new(spec.lr, get("gamma", 0.9), get("delta", 1e-8)).with_decay(decay),
        ),
        "sc_rmsprop" => Box::new(
            SCRMSProp::new(
                spec.lr,
                get("gamma", 0.9),
                get("xi_1", 0.1),
                get("xi_2", 0.1),
            )
            .with_decay(decay),
        ),
        other => return Err(Error::ConfigError(format!("Unknown optimizer: {other}"))),
    };

    tracing::debug!(optimizer = %name, lr = spec.lr, decay, "built optimizer");
    Ok(optimizer)
}

/// Build the learning rate scheduler named in `training`, if any
///
/// - `cosine`: anneal from `lr` to `scheduler_param` (default 0) over `steps`
/// - `inverse_time`: `lr / (1 + rate·t)` with `rate = scheduler_param` (default 1)
/// - `inverse_sqrt`: `lr / √(1 + rate·t)`
pub fn build_scheduler(training: &TrainingParams, lr: f32) -> Result<Option<Box<dyn LRScheduler>>> {
    let Some(name) = &training.lr_scheduler else {
        return Ok(None);
    };

    let scheduler: Box<dyn LRScheduler> = match name.to_lowercase().as_str() {
        "cosine" => Box::new(CosineAnnealingLR::new(
            lr,
            training.steps as usize,
            training.scheduler_param.unwrap_or(0.0),
        )),
        "inverse_time" => Box::new(InverseTimeLR::new(
            lr,
            training.scheduler_param.unwrap_or(1.0),
            1.0,
        )),
        "inverse_sqrt" => Box::new(InverseTimeLR::new(
            lr,
            training.scheduler_param.unwrap_or(1.0),
            0.5,
        )),
        other => return Err(Error::ConfigError(format!("Unknown scheduler: {other}"))),
    };

    Ok(Some(scheduler))
}
