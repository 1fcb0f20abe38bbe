use std::fs;
use std::path::Path;

use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::rand_core::{CryptoRngCore, OsRng};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::signer::{RecordSigner, RecordVerifier};
use crate::error::{Result, SignerError};

pub const RSA_KEY_BITS: usize = 2048;
pub const RSA_ALGORITHM: &str = "rsa-pkcs1v15-sha256";

/// RSA PKCS#1 v1.5 signer with SHA-256 digest.
pub struct RsaSigner {
    signing_key: SigningKey<Sha256>,
    private_key: RsaPrivateKey,
}

impl RsaSigner {
    pub fn new(private_key: RsaPrivateKey) -> Self {
        let signing_key = SigningKey::<Sha256>::new(private_key.clone());
        Self {
            signing_key,
            private_key,
        }
    }

    /// Fresh key from the operating system RNG.
    pub fn generate(bits: usize) -> Result<Self> {
        generate_with(&mut OsRng, bits).map(Self::new)
    }

    /// Deterministic key: the SHA-256 hash of the seed seeds a ChaCha20
    /// CSPRNG used for key generation.
    pub fn from_seed(seed: &str, bits: usize) -> Result<Self> {
        let hash = Sha256::digest(seed.as_bytes());
        let mut rng = ChaCha20Rng::from_seed(hash.into());
        generate_with(&mut rng, bits).map(Self::new)
    }

    /// Parse a PKCS#8 (`PRIVATE KEY`) or PKCS#1 (`RSA PRIVATE KEY`) PEM.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|pkcs8_err| {
                RsaPrivateKey::from_pkcs1_pem(pem).map_err(|_| pkcs8_err)
            })
            .map_err(|e| SignerError::KeyLoad(format!("unreadable RSA private key: {e}")))?;
        Ok(Self::new(private_key))
    }

    pub fn from_pem_file(path: &Path) -> Result<Self> {
        let pem = read_key_file(path)?;
        let signer = Self::from_pem(&pem).map_err(|e| with_path(e, path))?;
        debug!(path = %path.display(), "loaded private key");
        Ok(signer)
    }

    pub fn to_pem(&self) -> Result<String> {
        self.private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map(|pem| pem.as_str().to_owned())
            .map_err(|e| SignerError::KeyGeneration(format!("encoding private key: {e}")))
    }

    pub fn public_key(&self) -> RsaPublicKey {
        self.private_key.to_public_key()
    }

    pub fn public_key_pem(&self) -> Result<String> {
        self.public_key()
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| SignerError::KeyGeneration(format!("encoding public key: {e}")))
    }

    pub fn verifier(&self) -> RsaVerifier {
        RsaVerifier::new(self.public_key())
    }
}

impl RecordSigner for RsaSigner {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let signature = self
            .signing_key
            .try_sign(message)
            .map_err(|e| SignerError::Signing(e.to_string()))?;
        Ok(signature.to_vec())
    }

    fn algorithm(&self) -> &str {
        RSA_ALGORITHM
    }
}

/// RSA PKCS#1 v1.5 verifier with SHA-256 digest.
pub struct RsaVerifier {
    verifying_key: VerifyingKey<Sha256>,
}

impl RsaVerifier {
    pub fn new(public_key: RsaPublicKey) -> Self {
        Self {
            verifying_key: VerifyingKey::<Sha256>::new(public_key),
        }
    }

    /// Parse an SPKI (`PUBLIC KEY`) or PKCS#1 (`RSA PUBLIC KEY`) PEM.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let public_key = RsaPublicKey::from_public_key_pem(pem)
            .or_else(|spki_err| RsaPublicKey::from_pkcs1_pem(pem).map_err(|_| spki_err))
            .map_err(|e| SignerError::KeyLoad(format!("unreadable RSA public key: {e}")))?;
        Ok(Self::new(public_key))
    }

    pub fn from_pem_file(path: &Path) -> Result<Self> {
        let pem = read_key_file(path)?;
        let verifier = Self::from_pem(&pem).map_err(|e| with_path(e, path))?;
        debug!(path = %path.display(), "loaded public key");
        Ok(verifier)
    }
}

impl RecordVerifier for RsaVerifier {
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(signature) = Signature::try_from(signature) else {
            return false;
        };
        self.verifying_key.verify(message, &signature).is_ok()
    }

    fn algorithm(&self) -> &str {
        RSA_ALGORITHM
    }
}

fn generate_with<R: CryptoRngCore + ?Sized>(rng: &mut R, bits: usize) -> Result<RsaPrivateKey> {
    if bits < RSA_KEY_BITS {
        return Err(SignerError::KeyGeneration(format!(
            "key size {bits} is below the {RSA_KEY_BITS}-bit minimum"
        )));
    }
    RsaPrivateKey::new(rng, bits)
        .map_err(|e| SignerError::KeyGeneration(format!("generating RSA key: {e}")))
}

fn read_key_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| SignerError::KeyLoad(format!("{}: {e}", path.display())))
}

fn with_path(error: SignerError, path: &Path) -> SignerError {
    match error {
        SignerError::KeyLoad(reason) => {
            SignerError::KeyLoad(format!("{}: {reason}", path.display()))
        }
        other => other,
    }
}
