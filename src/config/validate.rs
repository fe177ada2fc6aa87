//! Configuration validation

use super::schema::{OptimSpec, ProblemSpec, RunSpec, TrainingParams};
use crate::optim::OPTIMIZER_NAMES;

/// Learning rate schedulers accepted in `training.lr_scheduler`
pub const SCHEDULER_NAMES: [&str; 3] = ["cosine", "inverse_time", "inverse_sqrt"];

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid optimizer: {0} (must be one of: adagrad, rmsprop, sc_adagrad, rmsprop_variant, sc_rmsprop)")]
    InvalidOptimizer(String),

    #[error("Invalid learning rate: {0} (must be >= 0.0)")]
    InvalidLearningRate(f32),

    #[error("Unknown hyperparameter '{key}' for optimizer {optimizer}")]
    UnknownHyperparameter { optimizer: String, key: String },

    #[error("Hyperparameter '{0}' must be a number")]
    NotANumber(String),

    #[error("Invalid {key}: {value} (must be {rule})")]
    OutOfRange {
        key: String,
        value: f32,
        rule: &'static str,
    },

    #[error("Invalid steps: {0} (must be > 0)")]
    InvalidSteps(u64),

    #[error("Invalid log interval: {0} (must be > 0)")]
    InvalidLogInterval(u64),

    #[error("Invalid gradient clip value: {0} (must be > 0.0)")]
    InvalidGradClip(f32),

    #[error("Invalid scheduler: {0} (must be one of: cosine, inverse_time, inverse_sqrt)")]
    InvalidScheduler(String),

    #[error("Invalid problem: {0}")]
    InvalidProblem(String),
}

/// Hyperparameter keys accepted by each optimizer
pub fn allowed_hyperparameters(optimizer: &str) -> Option<&'static [&'static str]> {
    match optimizer {
        "adagrad" => Some(&["epsilon", "decay"]),
        "rmsprop" => Some(&["rho", "epsilon", "decay"]),
        "sc_adagrad" => Some(&["xi_1", "xi_2", "decay"]),
        "rmsprop_variant" => Some(&["gamma", "delta", "decay"]),
        "sc_rmsprop" => Some(&["gamma", "xi_1", "xi_2", "decay"]),
        _ => None,
    }
}

fn check_range(key: &str, value: f32) -> Result<(), ValidationError> {
    let (ok, rule) = match key {
        "decay" => (value >= 0.0, ">= 0.0"),
        "epsilon" | "delta" | "xi_1" | "xi_2" => (value > 0.0, "> 0.0"),
        "rho" => ((0.0..1.0).contains(&value), "in [0.0, 1.0)"),
        "gamma" => (value > 0.0 && value <= 1.0, "in (0.0, 1.0]"),
        _ => (true, ""),
    };

    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            key: key.to_string(),
            value,
            rule: if rule.is_empty() { "finite" } else { rule },
        })
    }
}

/// Validate an optimizer specification
///
/// Checks:
/// - The name is a registered optimizer
/// - The learning rate is finite and non-negative
/// - Every hyperparameter is known to that optimizer, numeric, and in range
pub fn validate_optim_spec(spec: &OptimSpec) -> Result<(), ValidationError> {
    let name = spec.canonical_name();
    if !OPTIMIZER_NAMES.contains(&name.as_str()) {
        return Err(ValidationError::InvalidOptimizer(spec.name.clone()));
    }

    if !(spec.lr.is_finite() && spec.lr >= 0.0) {
        return Err(ValidationError::InvalidLearningRate(spec.lr));
    }

    let allowed = allowed_hyperparameters(&name).unwrap_or(&[]);
    // Sorted so the first reported error does not depend on hash order
    let mut keys: Vec<&String> = spec.params.keys().collect();
    keys.sort();

    for key in keys {
        if !allowed.contains(&key.as_str()) {
            return Err(ValidationError::UnknownHyperparameter {
                optimizer: name,
                key: key.clone(),
            });
        }
        let value = spec
            .param(key)
            .ok_or_else(|| ValidationError::NotANumber(key.clone()))?;
        check_range(key, value)?;
    }

    Ok(())
}

fn validate_training(training: &TrainingParams) -> Result<(), ValidationError> {
    if training.steps == 0 {
        return Err(ValidationError::InvalidSteps(training.steps));
    }

    if training.log_interval == 0 {
        return Err(ValidationError::InvalidLogInterval(training.log_interval));
    }

    for clip in [training.grad_clip, training.clip_value].into_iter().flatten() {
        if !(clip.is_finite() && clip > 0.0) {
            return Err(ValidationError::InvalidGradClip(clip));
        }
    }

    if let Some(scheduler) = &training.lr_scheduler {
        if !SCHEDULER_NAMES.contains(&scheduler.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidScheduler(scheduler.clone()));
        }
    }

    if let Some(param) = training.scheduler_param {
        if !(param.is_finite() && param >= 0.0) {
            return Err(ValidationError::OutOfRange {
                key: "scheduler_param".to_string(),
                value: param,
                rule: ">= 0.0",
            });
        }
    }

    Ok(())
}

fn validate_problem(problem: &ProblemSpec) -> Result<(), ValidationError> {
    match problem {
        ProblemSpec::Quadratic { scales, start } => {
            if scales.is_empty() {
                return Err(ValidationError::InvalidProblem(
                    "quadratic needs at least one scale".to_string(),
                ));
            }
            if scales.iter().any(|&c| !(c.is_finite() && c > 0.0)) {
                return Err(ValidationError::InvalidProblem(
                    "quadratic scales must be > 0.0".to_string(),
                ));
            }
            if let Some(start) = start {
                if start.len() != scales.len() {
                    return Err(ValidationError::InvalidProblem(format!(
                        "quadratic start has {} values for {} scales",
                        start.len(),
                        scales.len()
                    )));
                }
            }
        }
        ProblemSpec::Rosenbrock { b, .. } => {
            if !(b.is_finite() && *b > 0.0) {
                return Err(ValidationError::InvalidProblem(format!(
                    "rosenbrock b must be > 0.0, got {b}"
                )));
            }
        }
        ProblemSpec::Logistic {
            samples,
            features,
            l2,
            ..
        } => {
            if *samples == 0 || *features == 0 {
                return Err(ValidationError::InvalidProblem(
                    "logistic needs at least one sample and one feature".to_string(),
                ));
            }
            if !(l2.is_finite() && *l2 >= 0.0) {
                return Err(ValidationError::InvalidProblem(format!(
                    "logistic l2 must be >= 0.0, got {l2}"
                )));
            }
        }
    }

    Ok(())
}

/// Validate a complete run specification
pub fn validate_config(spec: &RunSpec) -> Result<(), ValidationError> {
    validate_optim_spec(&spec.optimizer)?;
    validate_training(&spec.training)?;
    validate_problem(&spec.problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_spec(optimizer: OptimSpec) -> RunSpec {
        RunSpec {
            optimizer,
            problem: ProblemSpec::Quadratic {
                scales: vec![1.0, 10.0],
                start: None,
            },
            training: TrainingParams::default(),
        }
    }

    #[test]
    fn test_valid_specs_for_every_optimizer() {
        for name in OPTIMIZER_NAMES {
            let spec = OptimSpec::new(name, 0.01).with_param("decay", 0.0);
            assert!(validate_optim_spec(&spec).is_ok(), "{name} rejected");
        }
    }

    #[test]
    fn test_name_is_normalized() {
        let spec = OptimSpec::new("SC-RMSProp", 0.01);
        assert!(validate_optim_spec(&spec).is_ok());
    }

    #[test]
    fn test_unknown_optimizer() {
        let spec = OptimSpec::new("adam", 0.001);
        assert_eq!(
            validate_optim_spec(&spec),
            Err(ValidationError::InvalidOptimizer("adam".to_string()))
        );
    }

    #[test]
    fn test_zero_lr_allowed_negative_rejected() {
        assert!(validate_optim_spec(&OptimSpec::new("adagrad", 0.0)).is_ok());
        assert_eq!(
            validate_optim_spec(&OptimSpec::new("adagrad", -0.1)),
            Err(ValidationError::InvalidLearningRate(-0.1))
        );
        assert!(validate_optim_spec(&OptimSpec::new("adagrad", f32::NAN)).is_err());
    }

    #[test]
    fn test_unknown_hyperparameter() {
        let spec = OptimSpec::new("sc_adagrad", 0.01).with_param("rho", 0.9);
        match validate_optim_spec(&spec) {
            Err(ValidationError::UnknownHyperparameter { optimizer, key }) => {
                assert_eq!(optimizer, "sc_adagrad");
                assert_eq!(key, "rho");
            }
            other => panic!("expected unknown hyperparameter, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_hyperparameter() {
        let mut spec = OptimSpec::new("rmsprop", 0.01);
        spec.params
            .insert("rho".to_string(), serde_json::Value::String("high".into()));
        assert_eq!(
            validate_optim_spec(&spec),
            Err(ValidationError::NotANumber("rho".to_string()))
        );
    }

    #[test]
    fn test_hyperparameter_ranges() {
        let rejected = [
            ("adagrad", "epsilon", 0.0),
            ("rmsprop", "rho", 1.0),
            ("rmsprop", "rho", -0.1),
            ("sc_adagrad", "xi_1", 0.0),
            ("sc_adagrad", "xi_2", -1.0),
            ("rmsprop_variant", "gamma", 0.0),
            ("rmsprop_variant", "gamma", 1.5),
            ("rmsprop_variant", "delta", 0.0),
            ("sc_rmsprop", "decay", -0.01),
        ];

        for (name, key, value) in rejected {
            let spec = OptimSpec::new(name, 0.01).with_param(key, value);
            assert!(
                matches!(
                    validate_optim_spec(&spec),
                    Err(ValidationError::OutOfRange { .. })
                ),
                "{name}.{key} = {value} accepted"
            );
        }

        let accepted = [
            ("rmsprop", "rho", 0.0),
            ("rmsprop_variant", "gamma", 1.0),
            ("sc_rmsprop", "gamma", 1.0),
        ];
        for (name, key, value) in accepted {
            let spec = OptimSpec::new(name, 0.01).with_param(key, value);
            assert!(validate_optim_spec(&spec).is_ok(), "{name}.{key} = {value} rejected");
        }
    }

    #[test]
    fn test_training_params() {
        let mut spec = run_spec(OptimSpec::new("sc_adagrad", 0.1));
        spec.training.steps = 0;
        assert_eq!(validate_config(&spec), Err(ValidationError::InvalidSteps(0)));

        let mut spec = run_spec(OptimSpec::new("sc_adagrad", 0.1));
        spec.training.grad_clip = Some(0.0);
        assert_eq!(
            validate_config(&spec),
            Err(ValidationError::InvalidGradClip(0.0))
        );

        let mut spec = run_spec(OptimSpec::new("sc_adagrad", 0.1));
        spec.training.lr_scheduler = Some("step".to_string());
        assert_eq!(
            validate_config(&spec),
            Err(ValidationError::InvalidScheduler("step".to_string()))
        );
    }

    #[test]
    fn test_problem_validation() {
        let mut spec = run_spec(OptimSpec::new("adagrad", 0.1));
        spec.problem = ProblemSpec::Quadratic {
            scales: vec![1.0, 2.0],
            start: Some(vec![1.0]),
        };
        assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidProblem(_))
        ));

        spec.problem = ProblemSpec::Logistic {
            samples: 0,
            features: 3,
            l2: 0.1,
            seed: 0,
        };
        assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidProblem(_))
        ));
    }
}
