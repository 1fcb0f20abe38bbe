pub mod encoding;
pub mod error;
pub mod pipeline;
pub mod records;
pub mod signing;
pub mod trailer;

pub use encoding::{ContentDigest, canonicalize, digest};
pub use error::{Result, SignerError};
pub use pipeline::{SignedRecords, Verification, digest_file, sign_file, sign_records, verify_file, verify_records};
pub use records::RecordSet;
pub use signing::{KeyGenOptions, RecordSigner, RecordVerifier, RsaSigner, RsaVerifier, write_keypair};
pub use trailer::Trailer;
