use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_K, DEFAULT_LAYER_COUNT};
use crate::correction::CorrectionParameters;
use crate::error::{MgcError, Result};
use crate::multiscale::DecompositionParameters;

/// Immutable inputs of one correction run, built once and passed by value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRequest {
    /// Number of median layers removed from both images.
    #[serde(default = "default_layers")]
    pub layers: usize,
    /// Correction strength.
    #[serde(default = "default_k")]
    pub k: f32,
}

fn default_layers() -> usize {
    DEFAULT_LAYER_COUNT
}

fn default_k() -> f32 {
    DEFAULT_K
}

impl Default for CorrectionRequest {
    fn default() -> Self {
        Self {
            layers: DEFAULT_LAYER_COUNT,
            k: DEFAULT_K,
        }
    }
}

impl CorrectionRequest {
    pub fn new(layers: usize, k: f32) -> Self {
        Self { layers, k }
    }

    pub fn decomposition(&self) -> DecompositionParameters {
        DecompositionParameters::new(self.layers)
    }

    pub fn correction(&self) -> CorrectionParameters {
        CorrectionParameters::new(self.k)
    }

    pub fn validate(&self) -> Result<()> {
        self.decomposition().validate()?;
        self.correction().validate()
    }
}

/// Persisted settings for a headless run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MgcConfig {
    pub target: PathBuf,
    pub reference: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub correction: CorrectionRequest,
}

impl MgcConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| MgcError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| MgcError::Config(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

impl Default for MgcConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from("target.tiff"),
            reference: PathBuf::from("reference.tiff"),
            output: PathBuf::from("target_corrected.tiff"),
            correction: CorrectionRequest::default(),
        }
    }
}
