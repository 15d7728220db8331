//! TextOrigin Core
//!
//! Core types and error handling shared across TextOrigin components.
//!
//! This crate provides:
//! - The upload envelope (`EncodedUpload`) and the verdict record (`ClassificationResult`)
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ClassificationResult, EncodedUpload};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{ClassificationResult, EncodedUpload};
}
