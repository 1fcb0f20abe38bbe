//! The `SIGNATURE|<hex>` line that closes a signed file.

use crate::error::{Result, SignerError};
use crate::records::RecordSet;

pub const TRAILER_TAG: &str = "SIGNATURE";
pub const TRAILER_SEPARATOR: char = '|';

/// A decoded trailer record holding the hex-encoded signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    signature_hex: String,
}

impl Trailer {
    pub fn new(signature_hex: impl Into<String>) -> Self {
        Self {
            signature_hex: signature_hex.into(),
        }
    }

    pub fn from_signature(signature: &[u8]) -> Self {
        Self::new(hex::encode(signature))
    }

    pub fn signature_hex(&self) -> &str {
        &self.signature_hex
    }

    /// Hex-decode the stored signature.
    ///
    /// Odd length or non-hex characters are a format error; a decodable but
    /// bogus signature is left for the verifier to reject.
    pub fn signature_bytes(&self) -> Result<Vec<u8>> {
        hex::decode(&self.signature_hex)
            .map_err(|e| SignerError::Format(format!("malformed signature hex: {e}")))
    }

    pub fn encode(&self) -> String {
        format!("{TRAILER_TAG}{TRAILER_SEPARATOR}{}", self.signature_hex)
    }

    pub fn decode(line: &[u8]) -> Result<Self> {
        let rest = strip_tag(line).ok_or_else(|| {
            SignerError::Format(format!(
                "last line does not start with {TRAILER_TAG}{TRAILER_SEPARATOR}"
            ))
        })?;
        let signature_hex = std::str::from_utf8(rest)
            .map_err(|_| SignerError::Format("signature field is not valid text".into()))?;
        Ok(Self::new(signature_hex))
    }
}

pub fn is_trailer(line: &[u8]) -> bool {
    strip_tag(line).is_some()
}

fn strip_tag(line: &[u8]) -> Option<&[u8]> {
    line.strip_prefix(TRAILER_TAG.as_bytes())?
        .strip_prefix(&[TRAILER_SEPARATOR as u8])
}

/// Detach the final line of a signed file.
///
/// A signed file needs at least one content line plus the trailer.
pub fn split(mut records: RecordSet) -> Result<(RecordSet, Vec<u8>)> {
    if records.len() < 2 {
        return Err(SignerError::Format(format!(
            "expected at least 2 lines (content plus signature), found {}",
            records.len()
        )));
    }
    let trailer_line = records.pop().unwrap_or_default();
    Ok((records, trailer_line))
}

pub fn append(mut content: RecordSet, trailer_line: impl Into<Vec<u8>>) -> RecordSet {
    content.push(trailer_line);
    content
}
