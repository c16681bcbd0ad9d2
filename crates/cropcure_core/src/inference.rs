//! Inference adapters.
//!
//! A [`Classifier`] turns a prepared `(1, 128, 128, 3)` tensor into one score
//! per catalog class. Implementations are shared across requests behind an
//! `Arc` and must be safe to call concurrently.

use crate::error::InferenceError;
use crate::ingest::INPUT_SHAPE;
use ndarray::Array4;

pub trait Classifier: Send + Sync {
    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>, InferenceError>;

    /// Short name for logs.
    fn name(&self) -> &str {
        "classifier"
    }
}

pub(crate) fn check_input(input: &Array4<f32>) -> Result<(), InferenceError> {
    if input.shape() != INPUT_SHAPE {
        return Err(InferenceError::InputShape {
            expected: INPUT_SHAPE,
            found: input.shape().to_vec(),
        });
    }
    Ok(())
}

/// Returns the same scores for every input. Used to replay a recorded model
/// output and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedScores {
    scores: Vec<f32>,
}

impl FixedScores {
    pub fn new(scores: Vec<f32>) -> Self {
        Self { scores }
    }

    pub fn scores(&self) -> &[f32] {
        &self.scores
    }
}

impl Classifier for FixedScores {
    fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>, InferenceError> {
        check_input(input)?;
        Ok(self.scores.clone())
    }

    fn name(&self) -> &str {
        "fixed-scores"
    }
}

#[cfg(feature = "ort")]
pub use self::onnx::OnnxClassifier;

#[cfg(feature = "ort")]
mod onnx {
    use super::{Classifier, check_input};
    use crate::error::InferenceError;
    use ndarray::{Array4, CowArray};
    use once_cell::sync::OnceCell;
    use ort::{
        GraphOptimizationLevel, SessionBuilder, environment::Environment, session::Session,
        tensor::OrtOwnedTensor, value::Value,
    };
    use std::path::Path;
    use std::sync::Arc;

    static ORT_ENV: OnceCell<Arc<Environment>> = OnceCell::new();

    fn environment() -> Result<Arc<Environment>, InferenceError> {
        ORT_ENV
            .get_or_try_init(|| {
                Environment::builder()
                    .with_name("cropcure")
                    .build()
                    .map(Environment::into_arc)
            })
            .cloned()
            .map_err(|e| InferenceError::Unavailable(format!("ONNX Runtime init failed: {e}")))
    }

    /// Classifier backed by an ONNX Runtime session, loaded once.
    pub struct OnnxClassifier {
        session: Session,
    }

    impl OnnxClassifier {
        pub fn load(model_path: &Path) -> Result<Self, InferenceError> {
            if !model_path.exists() {
                return Err(InferenceError::Unavailable(format!(
                    "model file missing: {}",
                    model_path.display()
                )));
            }
            let env = environment()?;
            let session = SessionBuilder::new(&env)
                .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level1))
                .and_then(|b| b.with_model_from_file(model_path))
                .map_err(|e| InferenceError::Unavailable(e.to_string()))?;
            tracing::info!("loaded ONNX model from {}", model_path.display());
            Ok(Self { session })
        }
    }

    impl Classifier for OnnxClassifier {
        fn predict(&self, input: &Array4<f32>) -> Result<Vec<f32>, InferenceError> {
            check_input(input)?;
            let input_array = input.clone().into_dyn();
            let cow = CowArray::from(input_array.view());
            let value = Value::from_array(self.session.allocator(), &cow)
                .map_err(|e| InferenceError::Backend(format!("cannot build input tensor: {e}")))?;
            let outputs: Vec<Value> = self
                .session
                .run(vec![value])
                .map_err(|e| InferenceError::Backend(e.to_string()))?;
            let first = outputs
                .first()
                .ok_or_else(|| InferenceError::Backend("model produced no output".into()))?;
            let scores: OrtOwnedTensor<f32, _> = first
                .try_extract()
                .map_err(|e| InferenceError::Backend(e.to_string()))?;
            let collected: Vec<f32> = scores.view().iter().cloned().collect();
            Ok(collected)
        }

        fn name(&self) -> &str {
            "onnx"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_scores_are_returned_for_valid_input() {
        let classifier = FixedScores::new(vec![0.25; 4]);
        let input = Array4::<f32>::zeros(INPUT_SHAPE);
        assert_eq!(classifier.predict(&input).unwrap(), vec![0.25; 4]);
    }

    #[test]
    fn wrong_input_shape_is_rejected() {
        let classifier = FixedScores::new(vec![1.0]);
        let input = Array4::<f32>::zeros((1, 3, 128, 128));
        let err = classifier.predict(&input).unwrap_err();
        assert!(matches!(
            err,
            InferenceError::InputShape { found, .. } if found == vec![1, 3, 128, 128]
        ));
    }
}
