//! Runtime configuration.

use crate::catalog::{Catalog, NUM_CLASSES};
use crate::error::ConfigurationError;
use crate::language::Language;
use crate::ranking::DEFAULT_TOP_K;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What the model's output layer emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    /// Softmax already applied.
    #[default]
    Probabilities,
    /// Raw logits; normalized before ranking.
    Logits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub model_path: PathBuf,
    /// Optional newline-separated class list shipped with the model.
    pub labels_path: Option<PathBuf>,
    pub output: ScoreKind,
    pub top_k: usize,
    pub language: Language,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/cropcure_model.onnx"),
            labels_path: None,
            output: ScoreKind::Probabilities,
            top_k: DEFAULT_TOP_K,
            language: Language::English,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigurationError> {
        toml::from_str(text).map_err(|source| ConfigurationError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Startup validation: catalog integrity, `top_k` range and, when
    /// configured, agreement between the label file and the catalog.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), ConfigurationError> {
        catalog.validate()?;
        if self.top_k == 0 || self.top_k > NUM_CLASSES {
            return Err(ConfigurationError::TopK {
                max: NUM_CLASSES,
                found: self.top_k,
            });
        }
        if let Some(path) = &self.labels_path {
            let labels = read_labels(path)?;
            catalog.check_labels(&labels)?;
            tracing::debug!("label file {} matches catalog", path.display());
        }
        Ok(())
    }
}

/// One label per non-empty line, surrounding whitespace ignored.
pub fn read_labels(path: &Path) -> Result<Vec<String>, ConfigurationError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigurationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}
