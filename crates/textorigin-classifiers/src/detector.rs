//! Human/AI detector over a sequence-classification backend

use crate::classifier::SequenceClassifier;
use crate::config::DetectorConfig;
use crate::model_loader::load_sequence_classifier;
use std::path::PathBuf;
use textorigin_core::{ClassificationResult, Result};
use tracing::debug;

/// Scores text as human-written or AI-generated.
///
/// Holds the loaded model for its whole lifetime; `classify` takes `&self`
/// and may be called from several threads at once.
pub struct Classifier {
    backend: Box<dyn SequenceClassifier>,
    ai_labels: Vec<String>,
}

impl Classifier {
    /// Load the model in `model_path` with default settings
    pub fn new(model_path: impl Into<PathBuf>) -> Result<Self> {
        Self::from_config(&DetectorConfig::new(model_path))
    }

    /// Load the model described by `config`
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        let backend = load_sequence_classifier(config)?;
        Ok(Self::with_backend(backend, config.ai_labels.clone()))
    }

    /// Wrap an already constructed backend
    pub fn with_backend(backend: Box<dyn SequenceClassifier>, ai_labels: Vec<String>) -> Self {
        Self { backend, ai_labels }
    }

    /// Classify `text`.
    ///
    /// Empty or whitespace-only text yields [`ClassificationResult::neutral`]
    /// without running the model. Anything longer than the backend's
    /// window is truncated.
    pub fn classify(&self, text: &str) -> Result<ClassificationResult> {
        if text.trim().is_empty() {
            debug!("No assessable content, returning neutral result");
            return Ok(ClassificationResult::neutral());
        }

        let prediction = self.backend.predict(text)?;
        let percent = f64::from(prediction.score) * 100.0;

        let result = if self.is_ai_label(&prediction.label) {
            ClassificationResult::from_ai_score(percent)
        } else {
            ClassificationResult::from_human_score(percent)
        };

        debug!(
            label = %prediction.label,
            ai_score = result.ai_score,
            human_score = result.human_score,
            latency_us = prediction.latency_us,
            "Text classified"
        );

        Ok(result)
    }

    /// Whether `label` names the AI-generated class
    pub fn is_ai_label(&self, label: &str) -> bool {
        self.ai_labels.iter().any(|l| l == label)
    }

    pub fn name(&self) -> &str {
        self.backend.name()
    }

    pub fn max_length(&self) -> usize {
        self.backend.max_length()
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("backend", &self.backend.name())
            .field("ai_labels", &self.ai_labels)
            .finish()
    }
}
