//! Sequence classifier trait and raw prediction types

use textorigin_core::Result;

/// Inference backend: one label for a whole text.
///
/// Implementations are immutable after construction, so a single instance
/// can serve concurrent callers.
pub trait SequenceClassifier: Send + Sync {
    /// Predict the most likely label for `text`
    fn predict(&self, text: &str) -> Result<Prediction>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Truncation window in tokens, special tokens included
    fn max_length(&self) -> usize;
}

/// Raw output of a single inference call
#[derive(Debug, Clone)]
pub struct Prediction {
    /// Winning label
    pub label: String,

    /// Confidence of the winning label (0.0-1.0)
    pub score: f32,

    /// Additional metadata
    pub metadata: PredictionMetadata,

    /// Latency in microseconds
    pub latency_us: u64,
}

impl Prediction {
    /// Create a new prediction
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
            metadata: PredictionMetadata::default(),
            latency_us: 0,
        }
    }

    /// Pick the highest-probability label.
    ///
    /// Ties go to the lowest index. Missing label names fall back to
    /// `LABEL_<idx>`.
    pub fn argmax(labels: &[String], probabilities: &[f32]) -> Self {
        let (idx, score) = probabilities
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, p)| match best {
                Some((_, top)) if p <= top => best,
                _ => Some((i, p)),
            })
            .unwrap_or((0, 0.0));

        let all_scores = probabilities
            .iter()
            .enumerate()
            .map(|(i, p)| (label_at(labels, i), *p))
            .collect();

        Self {
            label: label_at(labels, idx),
            score,
            metadata: PredictionMetadata {
                all_scores: Some(all_scores),
                ..Default::default()
            },
            latency_us: 0,
        }
    }
}

fn label_at(labels: &[String], idx: usize) -> String {
    labels
        .get(idx)
        .cloned()
        .unwrap_or_else(|| format!("LABEL_{idx}"))
}

/// Metadata about a prediction
#[derive(Debug, Clone, Default)]
pub struct PredictionMetadata {
    /// Model name or version
    pub model: Option<String>,

    /// Probability of every class, in label order
    pub all_scores: Option<Vec<(String, f32)>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> Vec<String> {
        vec!["Fake".to_string(), "Real".to_string()]
    }

    #[test]
    fn test_argmax_picks_highest() {
        let prediction = Prediction::argmax(&labels(), &[0.2, 0.8]);
        assert_eq!(prediction.label, "Real");
        assert!((prediction.score - 0.8).abs() < f32::EPSILON);

        let scores = prediction.metadata.all_scores.unwrap();
        assert_eq!(scores[0], ("Fake".to_string(), 0.2));
    }

    #[test]
    fn test_argmax_missing_label_name() {
        let prediction = Prediction::argmax(&[], &[0.1, 0.9]);
        assert_eq!(prediction.label, "LABEL_1");
    }

    #[test]
    fn test_argmax_tie_picks_first() {
        let prediction = Prediction::argmax(&labels(), &[0.5, 0.5]);
        assert_eq!(prediction.label, "Fake");

        let three = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(Prediction::argmax(&three, &[0.2, 0.4, 0.4]).label, "b");
    }

    #[test]
    fn test_argmax_empty() {
        let prediction = Prediction::argmax(&labels(), &[]);
        assert_eq!(prediction.label, "Fake");
        assert_eq!(prediction.score, 0.0);
    }
}
