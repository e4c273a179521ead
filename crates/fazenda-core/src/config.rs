//! Configuration structures for validation, generation and extraction.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::checksum::AlgorithmKind;
use crate::error::{FazendaError, Result};

/// Main configuration for fazenda.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FazendaConfig {
    /// Validation configuration.
    pub validation: ValidationConfig,

    /// Generation configuration.
    pub generation: GenerationConfig,

    /// Text extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Check digit validation configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Algorithm used for CPF. CNPJ always uses the weighted sum.
    pub cpf_algorithm: AlgorithmKind,

    /// Accept numbers made of a single repeated digit.
    pub all_same_digits_are_valid: bool,
}

/// Document generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Documents generated per invocation.
    pub count: usize,

    /// Print generated documents with their mask.
    pub masked: bool,

    /// Fixed seed for reproducible output.
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            count: 1,
            masked: true,
            seed: None,
        }
    }
}

/// Free-text extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Drop candidates whose check digits do not match.
    pub validate: bool,

    /// Minimum confidence to report a match (0.0 - 1.0).
    pub min_confidence: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            validate: true,
            min_confidence: 0.5,
        }
    }
}

impl FazendaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| FazendaError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| FazendaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
