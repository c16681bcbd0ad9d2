//! Leaf disease diagnosis: turns classifier scores for a plant-leaf image into
//! ranked, localized labels with a description and a cure tip.

pub mod catalog;
pub mod config;
pub mod diagnosis;
pub mod error;
pub mod format;
pub mod inference;
pub mod ingest;
pub mod language;
pub mod ranking;
pub mod remedy;
pub mod translate;

pub use catalog::{Catalog, ClassEntry, Localized, NUM_CLASSES};
pub use config::{AppConfig, ScoreKind};
pub use diagnosis::{Diagnoser, Diagnosis, DiagnosisSummary, RankedPrediction};
pub use error::{ConfigurationError, Error, InferenceError, IngestionError, Result};
pub use format::format_class_name;
#[cfg(feature = "ort")]
pub use inference::OnnxClassifier;
pub use inference::{Classifier, FixedScores};
pub use ingest::{INPUT_SIZE, is_supported_image};
pub use language::{LANGUAGES, Language, LanguagePreference};
pub use ranking::{Confidence, top_k};
pub use remedy::{resolve_icon, resolve_tip};
pub use translate::{display_name, translate_class};
