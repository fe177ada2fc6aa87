//! Checkpoint loading

use super::checkpoint::Checkpoint;
use super::format::CheckpointFormat;
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Load a checkpoint
///
/// The format is automatically detected from the file extension.
pub fn load_checkpoint(path: impl AsRef<Path>) -> Result<Checkpoint> {
    let path = path.as_ref();
    let format = CheckpointFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;

    let checkpoint: Checkpoint = match format {
        CheckpointFormat::Json => serde_json::from_str(&content)
            .map_err(|e| Error::Serialization(format!("JSON deserialization failed: {e}")))?,
        CheckpointFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| Error::Serialization(format!("YAML deserialization failed: {e}")))?,
    };

    tracing::debug!(
        path = %path.display(),
        optimizer = %checkpoint.optimizer.name,
        iterations = checkpoint.state.iterations,
        "loaded checkpoint"
    );
    Ok(checkpoint)
}
