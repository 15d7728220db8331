//! Error types for TextOrigin

/// Result type alias using TextOrigin's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for TextOrigin operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Upload content is not a `<prefix>,<base64>` data URI
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// File extension has no extractor
    #[error("unsupported file format: {filename}")]
    UnsupportedFormat { filename: String },

    /// Text extraction failed; the underlying cause is logged, not carried
    #[error("error processing file: {filename}")]
    ExtractionFailed { filename: String },

    /// Model or tokenizer artifacts could not be loaded
    #[error("model load failed: {0}")]
    ModelLoadFailed(String),

    /// Tokenization or inference failed
    #[error("classification failed: {0}")]
    ClassificationFailed(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new malformed input error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    /// Create a new unsupported format error
    pub fn unsupported_format(filename: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            filename: filename.into(),
        }
    }

    /// Create a new extraction error
    pub fn extraction(filename: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            filename: filename.into(),
        }
    }

    /// Create a new model load error
    pub fn model_load(msg: impl Into<String>) -> Self {
        Self::ModelLoadFailed(msg.into())
    }

    /// Create a new classification error
    pub fn classification(msg: impl Into<String>) -> Self {
        Self::ClassificationFailed(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
