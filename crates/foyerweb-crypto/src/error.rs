//! Error types for foyerweb-crypto

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for cryptographic failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CryptoErrorCode {
    /// Encryption failed
    EncryptionFailed,
    /// Decryption failed (wrong key or corrupted data)
    DecryptionFailed,
    /// Invalid encoding of stored ciphertext
    InvalidEncoding,
    /// Password hashing failed
    HashingFailed,
}

impl std::fmt::Display for CryptoErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CryptoErrorCode::EncryptionFailed => write!(f, "ENCRYPTION_FAILED"),
            CryptoErrorCode::DecryptionFailed => write!(f, "DECRYPTION_FAILED"),
            CryptoErrorCode::InvalidEncoding => write!(f, "INVALID_ENCODING"),
            CryptoErrorCode::HashingFailed => write!(f, "HASHING_FAILED"),
        }
    }
}

/// Cryptographic error type
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: invalid key or corrupted data")]
    DecryptionFailed,

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

impl CryptoError {
    /// Get the error code
    pub fn code(&self) -> CryptoErrorCode {
        match self {
            CryptoError::EncryptionFailed(_) => CryptoErrorCode::EncryptionFailed,
            CryptoError::DecryptionFailed => CryptoErrorCode::DecryptionFailed,
            CryptoError::InvalidEncoding(_) => CryptoErrorCode::InvalidEncoding,
            CryptoError::HashingFailed(_) => CryptoErrorCode::HashingFailed,
        }
    }
}

/// Result type with CryptoError
pub type CryptoResult<T> = Result<T, CryptoError>;
