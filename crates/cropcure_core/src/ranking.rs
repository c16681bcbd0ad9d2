//! Top-k selection over classifier scores.

use crate::catalog::NUM_CLASSES;
use crate::error::InferenceError;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Predictions shown to the user.
pub const DEFAULT_TOP_K: usize = 3;

/// A probability expressed as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f32);

impl Confidence {
    pub fn from_probability(p: f32) -> Self {
        Self(p * 100.0)
    }

    pub fn percent(self) -> f32 {
        self.0
    }

    /// Whole-percent value for progress bars, clamped to `0..=100`.
    pub fn progress(self) -> u8 {
        self.0.clamp(0.0, 100.0) as u8
    }
}

/// Two decimal places, e.g. `70.00`.
impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Rounded to two decimals so JSON matches what is displayed.
impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64((f64::from(self.0) * 100.0).round() / 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub index: usize,
    pub probability: f32,
}

impl Ranked {
    pub fn confidence(&self) -> Confidence {
        Confidence::from_probability(self.probability)
    }
}

/// Reject score vectors that cannot be aligned with the catalog.
pub fn check_scores(scores: &[f32]) -> Result<(), InferenceError> {
    if scores.len() != NUM_CLASSES {
        return Err(InferenceError::MalformedOutput {
            expected: NUM_CLASSES,
            found: scores.len(),
        });
    }
    if let Some(index) = scores.iter().position(|p| !p.is_finite()) {
        return Err(InferenceError::NonFinite { index });
    }
    Ok(())
}

/// Probabilities should sum to 1; anything else hints at a logits model
/// configured as a probability model.
pub fn warn_if_unnormalized(probabilities: &[f32]) {
    let sum: f32 = probabilities.iter().sum();
    if (sum - 1.0).abs() > 0.05 {
        tracing::warn!("scores sum to {sum:.4}, expected probabilities");
    }
}

/// Descending order with NaN after every number.
fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

/// The `k` highest scores in descending order. Equal scores keep ascending
/// index order; NaN scores rank last.
pub fn top_k(scores: &[f32], k: usize) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = scores
        .iter()
        .enumerate()
        .map(|(index, &probability)| Ranked { index, probability })
        .collect();
    ranked.sort_by(|a, b| descending(a.probability, b.probability));
    ranked.truncate(k);
    ranked
}

/// Numerically stable softmax for models that emit logits.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    if sum == 0.0 {
        return vec![0.0; logits.len()];
    }
    exps.into_iter().map(|x| x / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn example() -> Vec<f32> {
        let mut scores = vec![0.0; NUM_CLASSES];
        scores[..7].copy_from_slice(&[0.7, 0.1, 0.05, 0.05, 0.03, 0.02, 0.01]);
        scores
    }

    #[test]
    fn top_three_descending() {
        let top = top_k(&example(), DEFAULT_TOP_K);
        let indices: Vec<usize> = top.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(top[0].confidence().to_string(), "70.00");
    }

    #[test]
    fn ties_keep_lower_index_first() {
        let mut scores = vec![0.0; NUM_CLASSES];
        scores[9] = 0.3;
        scores[4] = 0.3;
        scores[12] = 0.3;
        scores[1] = 0.1;
        let indices: Vec<usize> = top_k(&scores, 3).iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![4, 9, 12]);
    }

    #[test]
    fn nan_scores_rank_last() {
        let scores = [0.1, f32::NAN, 0.9, 0.3, f32::NAN, 0.5, 0.2];
        let indices: Vec<usize> = top_k(&scores, 3).iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![2, 5, 3]);

        let all: Vec<usize> = top_k(&scores, scores.len()).iter().map(|r| r.index).collect();
        assert_eq!(all, vec![2, 5, 3, 6, 0, 1, 4]);
    }

    #[test]
    fn k_larger_than_input_returns_everything() {
        assert_eq!(top_k(&[0.2, 0.8], 3).len(), 2);
    }

    #[test]
    fn malformed_length_is_rejected() {
        assert!(matches!(
            check_scores(&[0.5, 0.5]),
            Err(InferenceError::MalformedOutput {
                expected: 15,
                found: 2
            })
        ));
    }

    #[test]
    fn nan_is_rejected() {
        let mut scores = example();
        scores[3] = f32::NAN;
        assert!(matches!(
            check_scores(&scores),
            Err(InferenceError::NonFinite { index: 3 })
        ));
    }

    #[test]
    fn unnormalized_scores_pass_the_shape_check() {
        assert!(check_scores(&[1.0; NUM_CLASSES]).is_ok());
    }

    #[test]
    fn confidence_display_and_progress() {
        let c = Confidence::from_probability(0.98766);
        assert_eq!(c.to_string(), "98.77");
        assert_eq!(c.progress(), 98);
        assert_eq!(Confidence::from_probability(1.2).progress(), 100);
    }

    #[test]
    fn confidence_serializes_rounded() {
        let json = serde_json::to_string(&Confidence::from_probability(0.123456)).unwrap();
        assert_eq!(json, "12.35");
    }

    #[test]
    fn softmax_normalizes() {
        let probs = softmax(&[1.0, 2.0, 3.0]);
        assert_relative_eq!(probs.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }
}
