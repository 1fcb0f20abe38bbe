mod signer;
mod rsa;
mod keygen;

pub use signer::{RecordSigner, RecordVerifier};
pub use self::rsa::{RSA_ALGORITHM, RSA_KEY_BITS, RsaSigner, RsaVerifier};
pub use keygen::{KeyGenOptions, generate_keypair, write_keypair};
