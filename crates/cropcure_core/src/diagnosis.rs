//! The per-upload pipeline: decode, infer, rank, localize.

use crate::catalog::Catalog;
use crate::config::{AppConfig, ScoreKind};
use crate::error::{ConfigurationError, Result};
use crate::inference::Classifier;
use crate::ingest;
use crate::language::Language;
use crate::ranking::{self, Confidence, DEFAULT_TOP_K};
use crate::remedy::{resolve_icon, resolve_tip};
use crate::translate::display_name;
use chrono::{DateTime, Local};
use image::DynamicImage;
use ndarray::Array4;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Format of the prediction timestamp shown to the user.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %I:%M %p";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPrediction {
    /// 1-based.
    pub rank: usize,
    pub class_index: usize,
    pub identifier: &'static str,
    pub display_name: String,
    pub confidence: Confidence,
}

/// Details for the top-ranked class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisSummary {
    pub identifier: &'static str,
    pub display_name: String,
    pub icon: &'static str,
    pub confidence: Confidence,
    pub progress: u8,
    pub description: &'static str,
    pub tip: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    pub language: Language,
    pub predictions: Vec<RankedPrediction>,
    pub summary: DiagnosisSummary,
    pub predicted_at: DateTime<Local>,
}

impl Diagnosis {
    pub fn predicted_at_display(&self) -> String {
        self.predicted_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Runs diagnoses against one shared classifier.
#[derive(Clone)]
pub struct Diagnoser {
    classifier: Arc<dyn Classifier>,
    catalog: &'static Catalog,
    top_k: usize,
    score_kind: ScoreKind,
}

impl Diagnoser {
    /// Uses the builtin catalog after validating it.
    pub fn new(classifier: Arc<dyn Classifier>) -> Result<Self> {
        Ok(Self {
            classifier,
            catalog: Catalog::load_validated()?,
            top_k: DEFAULT_TOP_K,
            score_kind: ScoreKind::Probabilities,
        })
    }

    /// Validates `config` (including the label file) before accepting it.
    pub fn from_config(classifier: Arc<dyn Classifier>, config: &AppConfig) -> Result<Self> {
        let catalog = Catalog::builtin();
        config.validate(catalog)?;
        Ok(Self {
            classifier,
            catalog,
            top_k: config.top_k,
            score_kind: config.output,
        })
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn diagnose_path(&self, path: &Path, lang: Language) -> Result<Diagnosis> {
        let img = ingest::load_path(path)?;
        tracing::debug!("decoded {} ({}x{})", path.display(), img.width(), img.height());
        self.diagnose_image(&img, lang)
    }

    pub fn diagnose_bytes(
        &self,
        bytes: &[u8],
        extension: &str,
        lang: Language,
    ) -> Result<Diagnosis> {
        let img = ingest::load_bytes(bytes, extension)?;
        self.diagnose_image(&img, lang)
    }

    pub fn diagnose_image(&self, img: &DynamicImage, lang: Language) -> Result<Diagnosis> {
        self.diagnose_tensor(&ingest::prepare_input(img), lang)
    }

    pub fn diagnose_tensor(&self, input: &Array4<f32>, lang: Language) -> Result<Diagnosis> {
        let raw = self.classifier.predict(input)?;
        tracing::debug!("{} returned {} scores", self.classifier.name(), raw.len());
        self.diagnose_scores(&raw, lang)
    }

    /// Rank and localize a raw score vector.
    pub fn diagnose_scores(&self, raw: &[f32], lang: Language) -> Result<Diagnosis> {
        ranking::check_scores(raw)?;
        let probabilities = match self.score_kind {
            ScoreKind::Probabilities => {
                ranking::warn_if_unnormalized(raw);
                raw.to_vec()
            }
            ScoreKind::Logits => ranking::softmax(raw),
        };

        let mut predictions = Vec::with_capacity(self.top_k);
        for (position, ranked) in ranking::top_k(&probabilities, self.top_k)
            .into_iter()
            .enumerate()
        {
            let entry = self.catalog.get(ranked.index).ok_or_else(|| {
                ConfigurationError::UnknownIdentifier(format!("class_{}", ranked.index))
            })?;
            predictions.push(RankedPrediction {
                rank: position + 1,
                class_index: ranked.index,
                identifier: entry.identifier,
                display_name: display_name(self.catalog, entry.identifier, lang)?,
                confidence: ranked.confidence(),
            });
        }

        let best = predictions
            .first()
            .ok_or(ConfigurationError::TopK {
                max: self.catalog.len(),
                found: self.top_k,
            })?;
        let summary = DiagnosisSummary {
            identifier: best.identifier,
            display_name: best.display_name.clone(),
            icon: resolve_icon(best.identifier),
            confidence: best.confidence,
            progress: best.confidence.progress(),
            description: self.catalog.describe(best.identifier, lang),
            tip: resolve_tip(best.identifier, lang),
        };
        tracing::info!("diagnosis: {} ({}%)", summary.identifier, summary.confidence);

        Ok(Diagnosis {
            language: lang,
            predictions,
            summary,
            predicted_at: Local::now(),
        })
    }
}
