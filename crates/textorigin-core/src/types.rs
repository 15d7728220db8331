//! Core types for TextOrigin

use base64::Engine;
use serde::{Deserialize, Serialize};

/// Media type used when the caller does not know one
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// An uploaded document delivered as a base64 data URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedUpload {
    /// `data:<mime>;base64,<payload>`
    pub content: String,

    /// Original file name; its extension selects the extractor
    pub filename: String,
}

impl EncodedUpload {
    /// Create an upload from an already encoded data URI
    pub fn new(content: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            filename: filename.into(),
        }
    }

    /// Encode raw file bytes as a data URI upload
    pub fn from_bytes(filename: impl Into<String>, media_type: &str, bytes: &[u8]) -> Self {
        let media_type = if media_type.is_empty() {
            DEFAULT_MEDIA_TYPE
        } else {
            media_type
        };
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);

        Self {
            content: format!("data:{media_type};base64,{payload}"),
            filename: filename.into(),
        }
    }
}

/// Human/AI verdict for a piece of text.
///
/// `human_score + ai_score == 100` for every value built through the
/// constructors below. The labels are empty only for [`ClassificationResult::neutral`],
/// which stands for "nothing to assess" rather than a genuine tie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Probability the text is human-written, in percent
    pub human_score: f64,

    /// Probability the text is AI-generated, in percent
    pub ai_score: f64,

    /// `human_score` rounded, e.g. `"13%"`
    pub human_score_label: String,

    /// `ai_score` rounded, e.g. `"87%"`
    pub ai_score_label: String,
}

impl ClassificationResult {
    /// Result returned for empty or whitespace-only text
    pub fn neutral() -> Self {
        Self {
            human_score: 50.0,
            ai_score: 50.0,
            human_score_label: String::new(),
            ai_score_label: String::new(),
        }
    }

    /// Build from the AI-class probability, in percent
    pub fn from_ai_score(ai_score: f64) -> Self {
        let human_score = 100.0 - ai_score;
        Self::labelled(human_score, ai_score)
    }

    /// Build from the human-class probability, in percent
    pub fn from_human_score(human_score: f64) -> Self {
        let ai_score = 100.0 - human_score;
        Self::labelled(human_score, ai_score)
    }

    /// False for the neutral "no content" result
    pub fn is_assessable(&self) -> bool {
        !self.human_score_label.is_empty() || !self.ai_score_label.is_empty()
    }

    fn labelled(human_score: f64, ai_score: f64) -> Self {
        Self {
            human_score,
            ai_score,
            human_score_label: percent_label(human_score),
            ai_score_label: percent_label(ai_score),
        }
    }
}

fn percent_label(score: f64) -> String {
    format!("{score:.0}%")
}
