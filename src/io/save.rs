//! Checkpoint saving

use super::checkpoint::Checkpoint;
use super::format::CheckpointFormat;
use crate::{Error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Save a checkpoint, choosing JSON or YAML from the file extension
///
/// Missing parent directories are created.
///
/// # Example
///
/// ```no_run
/// use scoptim::io::{save_checkpoint, Checkpoint};
/// use scoptim::optim::SCAdagrad;
/// use scoptim::Tensor;
///
/// let optimizer = SCAdagrad::default();
/// let params = vec![Tensor::from_vec(vec![1.0, 2.0], true)];
/// let checkpoint = Checkpoint::capture(&optimizer, &params);
///
/// save_checkpoint(&checkpoint, "run.json").unwrap();
/// ```
pub fn save_checkpoint(checkpoint: &Checkpoint, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = CheckpointFormat::from_path(path)?;

    let data = match format {
        CheckpointFormat::Json => serde_json::to_string_pretty(checkpoint)
            .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?,
        CheckpointFormat::Yaml => serde_yaml::to_string(checkpoint)
            .map_err(|e| Error::Serialization(format!("YAML serialization failed: {e}")))?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;

    tracing::debug!(path = %path.display(), ?format, "saved checkpoint");
    Ok(())
}
