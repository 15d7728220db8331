//! Plain-text payloads

use crate::ParseError;

/// Decode the payload as strict UTF-8, unmodified (a leading BOM is kept)
pub fn extract_text(bytes: &[u8]) -> Result<String, ParseError> {
    Ok(String::from_utf8(bytes.to_vec())?)
}
