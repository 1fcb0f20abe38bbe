mod canonical;
mod digest;

pub use canonical::canonicalize;
pub use digest::{ContentDigest, DIGEST_LEN, digest};

use crate::records::RecordSet;

/// The result of encoding a record set for signing.
pub struct EncodedContent {
    /// Canonical byte form of the content lines.
    pub data: Vec<u8>,
    /// SHA-256 of `data`.
    pub digest: ContentDigest,
}

impl EncodedContent {
    /// The exact bytes handed to the signature primitive: the ASCII of the
    /// lowercase hex digest, not the raw digest.
    pub fn signing_message(&self) -> String {
        self.digest.to_hex()
    }
}

/// Canonicalize content lines and compute their digest.
///
/// The caller must already have removed any signature trailer.
pub fn encode_records(records: &RecordSet) -> EncodedContent {
    let data = canonicalize(records.lines());
    let digest = digest(&data);
    EncodedContent { data, digest }
}
