//! Data-URI splitting and base64 payload decoding

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use textorigin_core::{Error, Result};

/// Standard alphabet; trailing `=` padding is optional
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Split `data:<mime>;base64,<payload>` into its media-type prefix and payload.
///
/// Exactly one `,` is accepted.
pub fn split(content: &str) -> Result<(&str, &str)> {
    let mut parts = content.split(',');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(prefix), Some(payload), None) => Ok((prefix, payload)),
        (_, None, _) => Err(Error::malformed(
            "content is missing the ',' between media type and payload",
        )),
        _ => Err(Error::malformed(
            "content has more than one ',' separator",
        )),
    }
}

/// Decode a base64 payload, ignoring embedded ASCII whitespace
pub fn decode_payload(payload: &str) -> Result<Vec<u8>> {
    let decoded = if payload.bytes().any(|b| b.is_ascii_whitespace()) {
        let compact: String = payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        PAYLOAD_ENGINE.decode(compact)
    } else {
        PAYLOAD_ENGINE.decode(payload)
    };

    decoded.map_err(|e| Error::malformed(format!("invalid base64 payload: {e}")))
}

/// Split and decode in one step, discarding the media type
pub fn decode(content: &str) -> Result<Vec<u8>> {
    let (_media_type, payload) = split(content)?;
    decode_payload(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        let (prefix, payload) = split("data:text/plain;base64,aGk=").unwrap();
        assert_eq!(prefix, "data:text/plain;base64");
        assert_eq!(payload, "aGk=");
    }

    #[test]
    fn test_split_requires_single_separator() {
        assert!(matches!(split("aGk="), Err(Error::MalformedInput(_))));
        assert!(matches!(split("a,b,c"), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_decode_padding_optional() {
        assert_eq!(decode_payload("aGk=").unwrap(), b"hi");
        assert_eq!(decode_payload("aGk").unwrap(), b"hi");
    }

    #[test]
    fn test_decode_ignores_line_breaks() {
        assert_eq!(decode_payload("aGVs\r\nbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_empty_payload() {
        assert!(decode("data:text/plain;base64,").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(
            decode("data:text/plain;base64,@@@@"),
            Err(Error::MalformedInput(_))
        ));
    }
}
