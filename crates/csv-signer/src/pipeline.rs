//! Sign and verify orchestration.
//!
//! Signing: canonicalize → digest → sign the hex digest → append trailer.
//! Verifying: split trailer → canonicalize → digest → verify the hex digest.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::encoding::{ContentDigest, encode_records};
use crate::error::{Result, SignerError};
use crate::records::RecordSet;
use crate::signing::{RecordSigner, RecordVerifier};
use crate::trailer::{self, Trailer};

/// A record set with its signature trailer appended.
#[derive(Debug, Clone)]
pub struct SignedRecords {
    /// Content lines followed by the trailer line.
    pub records: RecordSet,
    pub digest: ContentDigest,
    pub trailer: Trailer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verification {
    pub digest: ContentDigest,
    pub valid: bool,
}

pub fn sign_records(content: RecordSet, signer: &dyn RecordSigner) -> Result<SignedRecords> {
    if content.is_empty() {
        return Err(SignerError::EmptyContent);
    }
    if content.last().is_some_and(trailer::is_trailer) {
        warn!("refusing to sign content that already ends in a signature trailer");
        return Err(SignerError::Format(
            "input already ends with a signature trailer".into(),
        ));
    }

    let encoded = encode_records(&content);
    debug!(digest = %encoded.digest, lines = content.len(), "computed content digest");

    let signature = signer.sign(encoded.signing_message().as_bytes())?;
    let trailer = Trailer::from_signature(&signature);
    let records = trailer::append(content, trailer.encode());

    Ok(SignedRecords {
        records,
        digest: encoded.digest,
        trailer,
    })
}

pub fn verify_records(records: RecordSet, verifier: &dyn RecordVerifier) -> Result<Verification> {
    let (content, trailer_line) = trailer::split(records)?;

    let encoded = encode_records(&content);
    debug!(digest = %encoded.digest, lines = content.len(), "computed content digest");

    let trailer = Trailer::decode(&trailer_line)?;
    let signature = trailer.signature_bytes()?;

    let valid = verifier.verify(encoded.signing_message().as_bytes(), &signature);
    Ok(Verification {
        digest: encoded.digest,
        valid,
    })
}

/// Read `input`, sign it, and write content plus trailer to `output`.
///
/// On error `output` may have been partially written and must not be trusted.
pub fn sign_file(input: &Path, output: &Path, signer: &dyn RecordSigner) -> Result<SignedRecords> {
    let content = RecordSet::read(input)?;
    let signed = sign_records(content, signer)?;
    signed.records.write(output)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        digest = %signed.digest,
        algorithm = signer.algorithm(),
        "signed file"
    );
    Ok(signed)
}

/// Check the trailer of a signed file. The file is only read.
pub fn verify_file(path: &Path, verifier: &dyn RecordVerifier) -> Result<Verification> {
    let records = RecordSet::read(path)?;
    let verification = verify_records(records, verifier)?;

    if verification.valid {
        info!(path = %path.display(), digest = %verification.digest, "signature valid");
    } else {
        warn!(path = %path.display(), digest = %verification.digest, "signature invalid");
    }
    Ok(verification)
}

/// Digest of a file's content, excluding the trailer when there is one.
pub fn digest_file(path: &Path) -> Result<ContentDigest> {
    let mut records = RecordSet::read(path)?;
    if records.last().is_some_and(trailer::is_trailer) {
        records.pop();
    }
    Ok(encode_records(&records).digest)
}
