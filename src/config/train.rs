//! Single-command training from YAML configuration

use super::builder::{build_optimizer, build_scheduler};
use super::schema::RunSpec;
use super::validate::validate_config;
use crate::error::{Error, Result};
use crate::io::load_checkpoint;
use crate::problems::build_objective;
use crate::train::{TrainConfig, TrainResult, Trainer};
use std::fs;
use std::path::Path;

/// Train from a YAML configuration file
///
/// Loads and validates the config, builds the objective, optimizer and
/// scheduler, and runs the training loop.
///
/// # Example
///
/// ```no_run
/// use scoptim::config::train_from_yaml;
///
/// let result = train_from_yaml("config.yaml")?;
/// println!("final loss {}", result.final_loss);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn train_from_yaml<P: AsRef<Path>>(config_path: P) -> Result<TrainResult> {
    let spec = load_config(config_path)?;
    run_spec(&spec, None)
}

/// Run a validated spec, optionally resuming from a checkpoint
pub fn run_spec(spec: &RunSpec, resume: Option<&Path>) -> Result<TrainResult> {
    validate_config(spec).map_err(|e| Error::ConfigError(format!("Invalid config: {e}")))?;

    let objective = build_objective(&spec.problem)?;
    let optimizer = build_optimizer(&spec.optimizer)?;
    let config = TrainConfig::from_params(&spec.training);

    let mut trainer = Trainer::new(objective.init_params(), optimizer, config);
    if let Some(scheduler) = build_scheduler(&spec.training, spec.optimizer.lr)? {
        trainer.set_scheduler(scheduler);
    }

    if let Some(path) = resume {
        let checkpoint = load_checkpoint(path)?;
        if checkpoint.optimizer != trainer.optimizer().config() {
            tracing::info!(
                checkpoint = ?checkpoint.optimizer,
                config = ?spec.optimizer,
                "hyperparameters changed since the checkpoint, using the config's"
            );
        }
        trainer.resume(&checkpoint)?;
    }

    trainer.fit(objective.as_ref(), spec.training.steps)
}

/// Load run spec from YAML file (without running training)
///
/// Useful for testing config parsing and validation separately from training.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<RunSpec> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;

    let spec: RunSpec = serde_yaml::from_str(&yaml_content)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))?;

    validate_config(&spec).map_err(|e| Error::ConfigError(format!("Invalid config: {e}")))?;

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(yaml: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_valid_config() {
        let file = write_config(
            r#"
optimizer:
  name: sc-adagrad
  lr: 5.0

problem:
  kind: quadratic
  scales: [1.0, 4.0]

training:
  steps: 50
"#,
        );

        let spec = load_config(file.path()).unwrap();
        assert_eq!(spec.optimizer.canonical_name(), "sc_adagrad");
        assert_eq!(spec.training.steps, 50);
    }

    #[test]
    fn test_load_invalid_config() {
        let file = write_config(
            r#"
optimizer:
  name: sc_rmsprop
  lr: 0.01
  gamma: 1.5

problem:
  kind: quadratic
"#,
        );

        match load_config(file.path()) {
            Err(Error::ConfigError(msg)) => assert!(msg.contains("gamma"), "{msg}"),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_malformed_yaml() {
        let file = write_config("this is not valid yaml: [}");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_config(dir.path().join("missing.yaml"));
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_train_from_yaml() {
        let file = write_config(
            r#"
optimizer:
  name: sc_adagrad
  lr: 5.0

problem:
  kind: quadratic
  scales: [1.0, 10.0]

training:
  steps: 200
  log_interval: 50
"#,
        );

        let result = train_from_yaml(file.path()).unwrap();
        assert_eq!(result.steps, 200);
        assert!(result.final_loss < 1e-2);
    }

    #[test]
    fn test_run_spec_resume_continues_from_checkpoint() {
        let dir = TempDir::new().unwrap();
        let checkpoint = dir.path().join("run.yaml");

        let mut spec: RunSpec = serde_yaml::from_str(
            r#"
optimizer:
  name: rmsprop_variant
  lr: 0.5

problem:
  kind: quadratic
  scales: [1.0, 2.0]

training:
  steps: 10
"#,
        )
        .unwrap();
        spec.training.checkpoint = Some(checkpoint.clone());

        let first = run_spec(&spec, None).unwrap();
        let resumed = run_spec(&spec, Some(&checkpoint)).unwrap();

        assert!(resumed.final_loss < first.final_loss);
        let saved = crate::io::load_checkpoint(&checkpoint).unwrap();
        assert_eq!(saved.state.iterations, 20);
    }
}
