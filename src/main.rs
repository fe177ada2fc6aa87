//! scoptim CLI
//!
//! # Usage
//!
//! ```bash
//! # Run a config
//! scoptim run config.yaml
//!
//! # Run with overrides and a final checkpoint
//! scoptim run config.yaml --steps 1000 --lr 0.5 --checkpoint run.json
//!
//! # Continue a run
//! scoptim run config.yaml --resume run.json
//!
//! # Validate config
//! scoptim validate config.yaml
//!
//! # Show optimizers and their defaults
//! scoptim list
//! ```

use clap::Parser;
use scoptim::config::{apply_overrides, load_config, run_spec, Cli, Command, RunArgs, ValidateArgs};
use scoptim::optim::{Adagrad, Optimizer, RMSProp, RMSPropVariant, SCAdagrad, SCRMSProp};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Command::Run(args) => run(args),
        Command::Validate(args) => validate(args),
        Command::List => {
            list();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over the -v/-q flags
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: RunArgs) -> Result<(), String> {
    let mut spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut spec, &args);

    tracing::info!(
        config = %args.config.display(),
        optimizer = %spec.optimizer.name,
        problem = spec.problem.kind(),
        "running"
    );

    let result =
        run_spec(&spec, args.resume.as_deref()).map_err(|e| format!("Training error: {e}"))?;

    println!("final_loss: {}", result.final_loss);
    println!("best_loss: {}", result.best_loss);
    println!("final_lr: {}", result.final_lr);
    println!("steps: {}", result.steps);
    println!("elapsed_secs: {:.3}", result.elapsed_secs);
    if let Some(path) = result.checkpoint {
        println!("checkpoint: {}", path.display());
    }
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<(), String> {
    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    println!("Configuration is valid");
    println!("  Optimizer: {} (lr={})", spec.optimizer.canonical_name(), spec.optimizer.lr);
    let mut params: Vec<_> = spec.optimizer.params.iter().collect();
    params.sort_by(|a, b| a.0.cmp(b.0));
    for (key, value) in params {
        println!("    {key}: {value}");
    }
    println!("  Problem: {}", spec.problem.kind());
    println!("  Steps: {}", spec.training.steps);
    if let Some(clip) = spec.training.grad_clip {
        println!("  Gradient clipping: {clip}");
    }
    if let Some(scheduler) = &spec.training.lr_scheduler {
        println!("  Scheduler: {scheduler}");
    }
    Ok(())
}

fn list() {
    let defaults: [Box<dyn Optimizer>; 5] = [
        Box::new(Adagrad::default_params(0.01)),
        Box::new(RMSProp::default_params(0.001)),
        Box::new(SCAdagrad::default()),
        Box::new(RMSPropVariant::default_params(0.001)),
        Box::new(SCRMSProp::default()),
    ];

    for optimizer in defaults {
        let spec = optimizer.config();
        let mut params: Vec<_> = spec.params.iter().collect();
        params.sort_by(|a, b| a.0.cmp(b.0));
        let params = params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{:<16} lr={} {params}", spec.name, spec.lr);
    }
}
