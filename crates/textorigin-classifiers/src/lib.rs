//! TextOrigin Classifiers
//!
//! Scores text as human-written or AI-generated with a pretrained
//! sequence-classification model run through Candle.
//!
//! - [`Classifier`] normalizes a backend prediction into a
//!   [`ClassificationResult`](textorigin_core::ClassificationResult)
//! - [`SequenceClassifier`] is the inference seam, implemented for RoBERTa
//!   and BERT checkpoints
//! - Models are read from a local directory; nothing is downloaded

pub mod classifier;
pub mod config;
pub mod detector;
pub mod model_config;
pub mod model_loader;
pub mod sequence;

pub use classifier::{Prediction, PredictionMetadata, SequenceClassifier};
pub use config::{DetectorConfig, DeviceSpec};
pub use detector::Classifier;
pub use model_config::{Architecture, ModelConfig};
pub use model_loader::{create_device, load_sequence_classifier, DeviceType};
pub use sequence::{BertSequenceClassifier, RobertaSequenceClassifier};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Prediction, SequenceClassifier};
    pub use crate::config::{DetectorConfig, DeviceSpec};
    pub use crate::detector::Classifier;
}
