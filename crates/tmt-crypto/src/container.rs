//! Container text codec
//!
//! Container format (ASCII):
//! ```text
//! <base64(salt)>.<base64(nonce)>.<base64(ciphertext || 16-byte tag)>
//! ```
//!
//! Segments use the standard padded base64 alphabet. Nothing is trimmed:
//! surrounding whitespace or a trailing newline makes the container invalid.

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use tmt_core::{DecryptError, TmtResult};

const SEGMENTS: usize = 3;
const SEPARATOR: char = '.';

/// Decoded but still-encrypted container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub salt: Vec<u8>,
    pub nonce: Vec<u8>,
    /// Ciphertext with the authentication tag appended
    pub sealed: Vec<u8>,
}

impl Container {
    /// Split `raw` into its three segments and base64-decode each one.
    pub fn parse(raw: &str) -> TmtResult<Self> {
        let segments: Vec<&str> = raw.split(SEPARATOR).collect();
        if segments.len() != SEGMENTS {
            return Err(DecryptError::malformed(format!(
                "expected {SEGMENTS} segments, got {}",
                segments.len()
            )));
        }

        let decode = |name: &str, segment: &str| {
            B64.decode(segment)
                .map_err(|e| DecryptError::malformed(format!("{name} is not valid base64: {e}")))
        };

        Ok(Self {
            salt: decode("salt", segments[0])?,
            nonce: decode("nonce", segments[1])?,
            sealed: decode("sealed data", segments[2])?,
        })
    }

    /// Render the container text, the inverse of [`Container::parse`].
    pub fn encode(&self) -> String {
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            B64.encode(&self.salt),
            B64.encode(&self.nonce),
            B64.encode(&self.sealed)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_malformed(raw: &str) {
        match Container::parse(raw) {
            Err(DecryptError::MalformedContainer(_)) => {}
            other => panic!("expected MalformedContainer for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_segments_in_order() {
        let container = Container::parse("c2FsdA==.bm9uY2U=.ZGF0YQ==").unwrap();

        assert_eq!(container.salt, b"salt");
        assert_eq!(container.nonce, b"nonce");
        assert_eq!(container.sealed, b"data");
    }

    #[test]
    fn test_parse_wrong_segment_count() {
        assert_malformed("c2FsdA==");
        assert_malformed("c2FsdA==.bm9uY2U=");
        assert_malformed("c2FsdA==.bm9uY2U=.ZGF0YQ==.ZGF0YQ==");
        assert_malformed("a.b.c.d.e");
    }

    #[test]
    fn test_parse_empty_input() {
        assert_malformed("");
    }

    #[test]
    fn test_parse_empty_segments_decode_to_empty() {
        let container = Container::parse("..").unwrap();
        assert!(container.salt.is_empty());
        assert!(container.nonce.is_empty());
        assert!(container.sealed.is_empty());
    }

    #[test]
    fn test_parse_invalid_base64() {
        assert_malformed("c2FsdA==.bm9uY2U=.!!!!");
        assert_malformed("c2Fs*A==.bm9uY2U=.ZGF0YQ==");
        // bad padding
        assert_malformed("c2FsdA=.bm9uY2U=.ZGF0YQ==");
    }

    #[test]
    fn test_parse_does_not_trim() {
        assert_malformed("c2FsdA==.bm9uY2U=.ZGF0YQ==\n");
        assert_malformed(" c2FsdA==.bm9uY2U=.ZGF0YQ==");
    }

    #[test]
    fn test_encode_matches_wire_format() {
        let container = Container {
            salt: b"salt".to_vec(),
            nonce: b"nonce".to_vec(),
            sealed: b"data".to_vec(),
        };
        assert_eq!(container.encode(), "c2FsdA==.bm9uY2U=.ZGF0YQ==");
        assert_eq!(Container::parse(&container.encode()).unwrap(), container);
    }
}
