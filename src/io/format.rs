//! Serialization format definitions

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported checkpoint serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckpointFormat {
    /// JSON format (compact, exact float round trip)
    Json,

    /// YAML format (human-readable, matches the run configs)
    Yaml,
}

impl CheckpointFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &str {
        match self {
            CheckpointFormat::Json => "json",
            CheckpointFormat::Yaml => "yaml",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(CheckpointFormat::Json),
            "yaml" | "yml" => Some(CheckpointFormat::Yaml),
            _ => None,
        }
    }

    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::Serialization("File has no extension".to_string()))?;

        Self::from_extension(ext)
            .ok_or_else(|| Error::Serialization(format!("Unsupported file extension: {ext}")))
    }
}
