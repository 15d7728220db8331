//! Mock classifiers for testing
//!
//! Configurable `SequenceClassifier` implementations that exercise score
//! normalization and error handling without model weights.

use proptest::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use textorigin_classifiers::{Classifier, DetectorConfig, Prediction, SequenceClassifier};
use textorigin_core::{ClassificationResult, Error, Result};

/// A configurable mock classifier for testing
pub struct MockClassifier {
    name: String,
    score: f32,
    label: String,
    fail_with: Option<String>,
    call_count: Arc<AtomicU32>,
}

impl MockClassifier {
    /// Create a new mock classifier with the given name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            score: 0.5,
            label: "Real".to_string(),
            fail_with: None,
            call_count: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Set the score this classifier will return
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// Set the label this classifier will return
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Make every prediction fail with `message`
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    /// Shared counter of predict calls, readable after the mock is boxed
    pub fn calls(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.call_count)
    }
}

impl SequenceClassifier for MockClassifier {
    fn predict(&self, _text: &str) -> Result<Prediction> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        if let Some(message) = &self.fail_with {
            return Err(Error::classification(message.clone()));
        }

        Ok(Prediction::new(self.label.clone(), self.score))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn max_length(&self) -> usize {
        510
    }
}

fn classifier(mock: MockClassifier) -> Classifier {
    Classifier::with_backend(Box::new(mock), DetectorConfig::default().ai_labels)
}

fn assert_sums_to_hundred(result: &ClassificationResult) {
    assert!(
        (result.human_score + result.ai_score - 100.0).abs() < 1e-9,
        "scores do not sum to 100: {:?}",
        result
    );
}

#[test]
fn test_empty_text_is_neutral_without_inference() {
    let mock = MockClassifier::new("mock").with_label("Fake").with_score(0.9);
    let calls = mock.calls();
    let classifier = classifier(mock);

    for text in ["", "   ", "\n\t\r\n"] {
        let result = classifier.classify(text).unwrap();
        assert_eq!(result.human_score, 50.0);
        assert_eq!(result.ai_score, 50.0);
        assert_eq!(result.human_score_label, "");
        assert_eq!(result.ai_score_label, "");
        assert!(!result.is_assessable());
    }

    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn test_fake_label_is_ai() {
    let classifier = classifier(MockClassifier::new("mock").with_label("Fake").with_score(0.87));
    let result = classifier.classify("The quick brown fox.").unwrap();

    assert!((result.ai_score - 87.0).abs() < 1e-4);
    assert!((result.human_score - 13.0).abs() < 1e-4);
    assert_eq!(result.ai_score_label, "87%");
    assert_eq!(result.human_score_label, "13%");
    assert!(result.is_assessable());
    assert_sums_to_hundred(&result);
}

#[test]
fn test_ai_generated_label_is_ai() {
    let classifier =
        classifier(MockClassifier::new("mock").with_label("AI-Generated").with_score(0.6));
    let result = classifier.classify("Generated paragraph.").unwrap();

    assert!((result.ai_score - 60.0).abs() < 1e-4);
    assert_eq!(result.ai_score_label, "60%");
}

#[test]
fn test_other_label_is_human() {
    let classifier = classifier(MockClassifier::new("mock").with_label("Real").with_score(0.92));
    let result = classifier.classify("Handwritten notes.").unwrap();

    assert!((result.human_score - 92.0).abs() < 1e-4);
    assert!((result.ai_score - 8.0).abs() < 1e-4);
    assert_eq!(result.human_score_label, "92%");
    assert_eq!(result.ai_score_label, "8%");
}

#[test]
fn test_custom_ai_labels() {
    let config = DetectorConfig::default().with_ai_labels(["LABEL_1"]);
    let classifier = Classifier::with_backend(
        Box::new(MockClassifier::new("mock").with_label("LABEL_1").with_score(0.75)),
        config.ai_labels,
    );

    assert!(classifier.is_ai_label("LABEL_1"));
    assert!(!classifier.is_ai_label("Fake"));

    let result = classifier.classify("text").unwrap();
    assert!((result.ai_score - 75.0).abs() < 1e-4);
}

#[test]
fn test_labels_round_to_nearest() {
    let classifier = classifier(MockClassifier::new("mock").with_label("Fake").with_score(0.996));
    let result = classifier.classify("text").unwrap();

    assert_eq!(result.ai_score_label, "100%");
    assert_eq!(result.human_score_label, "0%");
}

#[test]
fn test_idempotent() {
    let classifier = classifier(MockClassifier::new("mock").with_label("Fake").with_score(0.42));

    let first = classifier.classify("Same text twice.").unwrap();
    let second = classifier.classify("Same text twice.").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_inference_error_single_attempt() {
    let mock = MockClassifier::new("broken").failing("forward pass exploded");
    let calls = mock.calls();
    let classifier = classifier(mock);

    let err = classifier.classify("Some text.").unwrap_err();
    assert!(matches!(err, Error::ClassificationFailed(_)));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn test_classifier_metadata() {
    let classifier = classifier(MockClassifier::new("mock-detector"));
    assert_eq!(classifier.name(), "mock-detector");
    assert_eq!(classifier.max_length(), 510);
}

#[test]
fn test_shared_across_threads() {
    let classifier = Arc::new(classifier(
        MockClassifier::new("mock").with_label("Fake").with_score(0.3),
    ));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let classifier = Arc::clone(&classifier);
            std::thread::spawn(move || classifier.classify(&format!("thread {i}")).unwrap())
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        assert!((result.ai_score - 30.0).abs() < 1e-4);
    }
}

proptest! {
    #[test]
    fn prop_scores_sum_to_hundred(
        text in "[a-zA-Z .]*[a-zA-Z][a-zA-Z .]*",
        score in 0.0f32..=1.0,
        is_ai in any::<bool>(),
    ) {
        let label = if is_ai { "Fake" } else { "Real" };
        let classifier = classifier(MockClassifier::new("mock").with_label(label).with_score(score));
        let result = classifier.classify(&text).unwrap();

        prop_assert!((result.human_score + result.ai_score - 100.0).abs() < 1e-9);
        prop_assert!(result.human_score_label.ends_with('%'));
        prop_assert!(result.ai_score_label.ends_with('%'));
    }

    #[test]
    fn prop_whitespace_is_neutral(text in "[ \t\r\n]*") {
        let classifier = classifier(MockClassifier::new("mock").with_label("Fake").with_score(0.99));
        prop_assert_eq!(classifier.classify(&text).unwrap(), ClassificationResult::neutral());
    }
}
