use crate::error::Result;

/// Trait for signing the hex digest of a record set.
///
/// Implementations are sync; signing is CPU-bound.
pub trait RecordSigner {
    /// Sign message bytes. Returns raw signature bytes.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;

    /// Algorithm identifier string (e.g. "rsa-pkcs1v15-sha256").
    fn algorithm(&self) -> &str;
}

/// Counterpart of [`RecordSigner`].
pub trait RecordVerifier {
    /// Check `signature` over `message`.
    ///
    /// A mismatch or a malformed signature is `false`, never an error.
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool;

    fn algorithm(&self) -> &str;
}
