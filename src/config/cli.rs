//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! scoptim run config.yaml
//! scoptim run config.yaml --steps 500 --lr 0.05
//! scoptim run config.yaml --checkpoint out.json
//! scoptim run config.yaml --resume out.json
//! scoptim validate config.yaml
//! scoptim list
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// scoptim: adaptive optimizers for strongly convex training
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "scoptim")]
#[command(version)]
#[command(about = "SC-Adagrad, SC-RMSProp and RMSProp-variant optimizers with a small training harness")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Minimize an objective described by a YAML run configuration
    Run(RunArgs),

    /// Validate a configuration file without running it
    Validate(ValidateArgs),

    /// List available optimizers and their hyperparameters
    List,
}

/// Arguments for the run command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override number of steps
    #[arg(short, long)]
    pub steps: Option<u64>,

    /// Override learning rate
    #[arg(long)]
    pub lr: Option<f32>,

    /// Write a checkpoint when the run finishes (.json, .yaml or .yml)
    #[arg(short, long)]
    pub checkpoint: Option<PathBuf>,

    /// Resume from a checkpoint
    #[arg(short, long)]
    pub resume: Option<PathBuf>,

    /// Override log interval
    #[arg(long)]
    pub log_every: Option<u64>,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,
}

/// Parse CLI arguments from an iterator (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a RunSpec
pub fn apply_overrides(spec: &mut super::RunSpec, args: &RunArgs) {
    if let Some(steps) = args.steps {
        spec.training.steps = steps;
    }
    if let Some(lr) = args.lr {
        spec.optimizer.lr = lr;
    }
    if let Some(checkpoint) = &args.checkpoint {
        spec.training.checkpoint = Some(checkpoint.clone());
    }
    if let Some(log_every) = args.log_every {
        spec.training.log_interval = log_every;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OptimSpec, ProblemSpec, RunSpec, TrainingParams};

    #[test]
    fn test_parse_run_command() {
        let cli = parse_args(["scoptim", "run", "config.yaml"]).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.config, PathBuf::from("config.yaml"));
                assert!(args.steps.is_none());
                assert!(args.resume.is_none());
            }
            _ => panic!("Expected Run command"),
        }
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = parse_args([
            "scoptim",
            "run",
            "config.yaml",
            "--steps",
            "250",
            "--lr",
            "0.5",
            "--checkpoint",
            "out.json",
            "--resume",
            "in.yaml",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.steps, Some(250));
                assert_eq!(args.lr, Some(0.5));
                assert_eq!(args.checkpoint, Some(PathBuf::from("out.json")));
                assert_eq!(args.resume, Some(PathBuf::from("in.yaml")));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_validate_and_list() {
        let cli = parse_args(["scoptim", "-q", "validate", "config.yaml"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Command::Validate(_)));

        let cli = parse_args(["scoptim", "list"]).unwrap();
        assert_eq!(cli.command, Command::List);
    }

    #[test]
    fn test_parse_rejects_missing_config() {
        assert!(parse_args(["scoptim", "run"]).is_err());
        assert!(parse_args(["scoptim", "train", "config.yaml"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut spec = RunSpec {
            optimizer: OptimSpec::new("sc_adagrad", 0.01),
            problem: ProblemSpec::Quadratic {
                scales: vec![1.0],
                start: None,
            },
            training: TrainingParams::default(),
        };

        let args = RunArgs {
            config: PathBuf::from("config.yaml"),
            steps: Some(42),
            lr: Some(0.3),
            checkpoint: Some(PathBuf::from("ckpt.yaml")),
            resume: None,
            log_every: Some(7),
        };

        apply_overrides(&mut spec, &args);
        assert_eq!(spec.training.steps, 42);
        assert_eq!(spec.optimizer.lr, 0.3);
        assert_eq!(spec.training.checkpoint, Some(PathBuf::from("ckpt.yaml")));
        assert_eq!(spec.training.log_interval, 7);
    }
}
