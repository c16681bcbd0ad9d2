//! Error taxonomy for the diagnosis pipeline.
//!
//! Configuration errors are startup failures; ingestion and inference errors
//! end a single request without producing a partial result.

use std::path::PathBuf;
use thiserror::Error;

/// Build-time data or configuration problems.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("catalog must hold {expected} classes, found {found}")]
    CatalogSize { expected: usize, found: usize },

    #[error("catalog entry at position {position} carries index {index}")]
    MisplacedEntry { position: usize, index: usize },

    #[error("duplicate class identifier: {0}")]
    DuplicateIdentifier(String),

    #[error("class {identifier} has no {language} text for {field}")]
    MissingText {
        identifier: String,
        language: &'static str,
        field: &'static str,
    },

    #[error("class identifier not in catalog: {0}")]
    UnknownIdentifier(String),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("label file lists {found} labels, catalog has {expected}")]
    LabelCount { expected: usize, found: usize },

    #[error("label {index} is {found:?}, catalog expects {expected:?}")]
    LabelMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("top_k must be between 1 and {max}, got {found}")]
    TopK { max: usize, found: usize },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Rejected uploads.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("unsupported file type: {0} (expected .jpg, .jpeg or .png)")]
    UnsupportedType(String),

    #[error("cannot read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Failures of the model forward pass or of its output.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference backend unavailable: {0}")]
    Unavailable(String),

    #[error("inference backend failed: {0}")]
    Backend(String),

    #[error("model returned {found} scores, expected {expected}")]
    MalformedOutput { expected: usize, found: usize },

    #[error("model returned a non-finite score at index {index}")]
    NonFinite { index: usize },

    #[error("input tensor has shape {found:?}, expected {expected:?}")]
    InputShape {
        expected: [usize; 4],
        found: Vec<usize>,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("upload rejected: {0}")]
    Ingestion(#[from] IngestionError),

    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),
}

pub type Result<T> = std::result::Result<T, Error>;
