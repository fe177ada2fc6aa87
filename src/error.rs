//! Error types for scoptim

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Parameter count mismatch: optimizer holds state for {expected} parameters, got {got}")]
    ParameterCountMismatch { expected: usize, got: usize },

    #[error("Cannot load {found} state into {expected} optimizer")]
    StateMismatch { expected: String, found: String },

    #[error("Training diverged at step {step}: loss is {loss}")]
    Diverged { step: u64, loss: f32 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
