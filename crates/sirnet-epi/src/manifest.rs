use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sirnet_core::errors::{ErrorInfo, SirError};
use sirnet_core::RunProvenance;

use crate::config::EpidemicConfig;
use crate::engine::RunStats;
use crate::summary::SeriesSummary;

/// Structured manifest describing one completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Configuration used for the run.
    pub config: EpidemicConfig,
    /// Hashes, seed and tool versions tying the output to its inputs.
    pub provenance: RunProvenance,
    /// Series file produced by the run (relative to the output directory).
    pub series_file: PathBuf,
    /// Aligned series file, when an alignment was requested and succeeded.
    #[serde(default)]
    pub aligned_file: Option<PathBuf>,
    /// Offset removed by the alignment.
    #[serde(default)]
    pub alignment_offset: Option<f64>,
    /// Headline numbers of the run.
    pub summary: SeriesSummary,
    /// Event accounting.
    pub stats: RunStats,
}

impl RunManifest {
    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), SirError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                SirError::Serde(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            SirError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            SirError::Serde(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, SirError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            SirError::Serde(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            SirError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}
