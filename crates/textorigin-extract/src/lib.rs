//! TextOrigin Extract
//!
//! Turns an uploaded document into plain text.
//!
//! Uploads arrive as base64 data URIs (`data:<mime>;base64,<payload>`). The
//! filename suffix picks the extractor:
//! - `.txt`: strict UTF-8, returned as-is
//! - `.docx`: visible body text, paragraphs separated by a blank line
//! - `.pdf`: page texts concatenated in order, no separator
//!
//! Parser failures never leak to the caller. They are logged and reported
//! as [`Error::ExtractionFailed`].

pub mod data_uri;
pub mod docx;
pub mod format;
pub mod pdf;
pub mod text;

pub use format::DocumentFormat;

use std::time::Instant;
use textorigin_core::{EncodedUpload, Error, Result};
use tracing::{debug, warn};

/// Underlying parser failure, kept internal to the extraction boundary
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("text payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("docx parse failed: {0}")]
    Docx(String),

    #[error("pdf parse failed: {0}")]
    Pdf(String),

    #[error("pdf parser panicked: {0}")]
    PdfPanic(String),
}

impl DocumentFormat {
    /// Run this format's extractor over decoded bytes
    pub fn extract_text(&self, bytes: &[u8]) -> std::result::Result<String, ParseError> {
        match self {
            Self::Txt => text::extract_text(bytes),
            Self::Docx => docx::extract_text(bytes),
            Self::Pdf => pdf::extract_text(bytes),
        }
    }
}

/// Extract plain text from a data-URI `content` named `filename`.
///
/// The format is resolved before the payload is decoded, so an unknown
/// extension is always reported as [`Error::UnsupportedFormat`].
pub fn extract(content: &str, filename: &str) -> Result<String> {
    let format = DocumentFormat::from_filename(filename)?;
    let bytes = data_uri::decode(content)?;

    let start = Instant::now();
    let text = format.extract_text(&bytes).map_err(|e| {
        warn!(filename, %format, error = %e, "text extraction failed");
        Error::extraction(filename)
    })?;

    debug!(
        filename,
        %format,
        bytes = bytes.len(),
        chars = text.chars().count(),
        latency_us = start.elapsed().as_micros() as u64,
        "extracted text"
    );

    Ok(text)
}

/// [`extract`] for an [`EncodedUpload`]
pub fn extract_upload(upload: &EncodedUpload) -> Result<String> {
    extract(&upload.content, &upload.filename)
}
