use std::fs;
use std::path::Path;

use tracing::info;

use super::rsa::{RSA_KEY_BITS, RsaSigner};
use crate::error::{Result, SignerError};

#[derive(Debug, Clone)]
pub struct KeyGenOptions {
    pub bits: usize,
    /// Derive the key deterministically from this seed instead of the OS RNG.
    pub seed: Option<String>,
}

impl Default for KeyGenOptions {
    fn default() -> Self {
        Self {
            bits: RSA_KEY_BITS,
            seed: None,
        }
    }
}

pub fn generate_keypair(options: &KeyGenOptions) -> Result<RsaSigner> {
    match &options.seed {
        Some(seed) => RsaSigner::from_seed(seed, options.bits),
        None => RsaSigner::generate(options.bits),
    }
}

/// Generate a keypair and write both halves as unencrypted PEM files.
///
/// Both encodings are produced before either file is touched, so an
/// encoding failure leaves no key files behind.
pub fn write_keypair(private_out: &Path, public_out: &Path, options: &KeyGenOptions) -> Result<RsaSigner> {
    let signer = generate_keypair(options)?;
    let private_pem = signer.to_pem()?;
    let public_pem = signer.public_key_pem()?;

    fs::write(private_out, private_pem).map_err(|e| SignerError::io(private_out, e))?;
    fs::write(public_out, public_pem).map_err(|e| SignerError::io(public_out, e))?;

    info!(
        private_key = %private_out.display(),
        public_key = %public_out.display(),
        bits = options.bits,
        seeded = options.seed.is_some(),
        "generated RSA keypair"
    );
    Ok(signer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::{RecordSigner, RecordVerifier, RsaVerifier};

    fn seeded(seed: &str) -> KeyGenOptions {
        KeyGenOptions {
            seed: Some(seed.into()),
            ..KeyGenOptions::default()
        }
    }

    #[test]
    fn default_is_2048_bits_unseeded() {
        let options = KeyGenOptions::default();
        assert_eq!(options.bits, 2048);
        assert!(options.seed.is_none());
    }

    #[test]
    fn written_keys_form_a_pair() {
        let dir = tempfile::tempdir().unwrap();
        let private_path = dir.path().join("private.pem");
        let public_path = dir.path().join("public.pem");

        write_keypair(&private_path, &public_path, &seeded("keygen-test")).unwrap();

        let signer = RsaSigner::from_pem_file(&private_path).unwrap();
        let verifier = RsaVerifier::from_pem_file(&public_path).unwrap();
        let sig = signer.sign(b"pair").unwrap();
        assert!(verifier.verify(b"pair", &sig));
    }

    #[test]
    fn unwritable_destination_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let private_path = dir.path().join("no-such-dir").join("private.pem");
        let public_path = dir.path().join("public.pem");

        let err = write_keypair(&private_path, &public_path, &seeded("keygen-io")).err().unwrap();
        assert_eq!(err.kind(), "io");
        assert!(!public_path.exists());
    }

    #[test]
    fn undersized_key_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let private_path = dir.path().join("private.pem");
        let public_path = dir.path().join("public.pem");
        let options = KeyGenOptions {
            bits: 1024,
            seed: Some("small".into()),
        };

        let err = write_keypair(&private_path, &public_path, &options).err().unwrap();
        assert_eq!(err.kind(), "key_generation");
        assert!(!private_path.exists());
    }
}
