use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No content lines to sign")]
    EmptyContent,
    #[error("Invalid signed file format: {0}")]
    Format(String),
    #[error("Failed to load key: {0}")]
    KeyLoad(String),
    #[error("Signing failed: {0}")]
    Signing(String),
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),
}

pub type Result<T> = std::result::Result<T, SignerError>;

impl SignerError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Stable machine-readable error category.
    pub fn kind(&self) -> &'static str {
        match self {
            SignerError::Io { .. } => "io",
            SignerError::EmptyContent => "empty_content",
            SignerError::Format(_) => "format",
            SignerError::KeyLoad(_) => "key_load",
            SignerError::Signing(_) => "signing",
            SignerError::KeyGeneration(_) => "key_generation",
        }
    }
}
