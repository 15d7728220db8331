//! Document format resolution

use std::fmt;
use textorigin_core::{Error, Result};

/// Upload formats with a text extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// UTF-8 plain text
    Txt,
    /// Office Open XML word-processing document
    Docx,
    /// Portable Document Format
    Pdf,
}

impl DocumentFormat {
    /// All supported formats
    pub const ALL: [DocumentFormat; 3] = [Self::Docx, Self::Txt, Self::Pdf];

    /// Resolve the format from a filename suffix (case-sensitive)
    pub fn from_filename(filename: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| filename.ends_with(format.suffix()))
            .ok_or_else(|| Error::unsupported_format(filename))
    }

    /// Filename suffix, including the dot
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Txt => ".txt",
            Self::Docx => ".docx",
            Self::Pdf => ".pdf",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.suffix()[1..])
    }
}
