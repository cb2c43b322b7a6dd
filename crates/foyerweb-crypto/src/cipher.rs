//! AES-256-GCM field encryption
//!
//! Labels and amounts are encrypted before they reach the database.
//! Each value is stored as base64(nonce || ciphertext || tag) with a
//! fresh random nonce per encryption.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::error::{CryptoError, CryptoResult};

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

/// Length of a base64-encoded 32-byte key
const RAW_KEY_B64_LEN: usize = 44;

/// Symmetric cipher for stored sheet fields.
///
/// Holds the derived 256-bit key; cheap to clone behind an `Arc`.
pub struct FieldCipher {
    key: [u8; 32],
}

impl FieldCipher {
    /// Derive the cipher from the configured secret.
    ///
    /// A 44-character string that decodes to exactly 32 bytes of
    /// base64 is used as the raw key. Any other secret is hashed with
    /// SHA-256 into a key, so operators can configure a plain
    /// passphrase.
    pub fn from_secret(secret: &str) -> Self {
        let trimmed = secret.trim();
        if trimmed.len() == RAW_KEY_B64_LEN {
            if let Ok(decoded) = STANDARD.decode(trimmed) {
                if decoded.len() == 32 {
                    let mut key = [0u8; 32];
                    key.copy_from_slice(&decoded);
                    return Self { key };
                }
            }
        }

        let digest = Sha256::digest(trimmed.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self { key }
    }

    /// Encrypt a field value to base64(nonce || ciphertext || tag).
    pub fn encrypt_value(&self, plaintext: &str) -> CryptoResult<String> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| CryptoError::EncryptionFailed(format!("Failed to create cipher: {}", e)))?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| CryptoError::EncryptionFailed(format!("Encryption failed: {}", e)))?;

        let mut payload = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&ciphertext);

        Ok(STANDARD.encode(payload))
    }

    /// Decrypt a stored field value.
    ///
    /// The empty string is its own plaintext; it is never produced by
    /// `encrypt_value` and marks an absent value.
    pub fn decrypt_value(&self, stored: &str) -> CryptoResult<String> {
        if stored.is_empty() {
            return Ok(String::new());
        }

        let payload = STANDARD
            .decode(stored)
            .map_err(|e| CryptoError::InvalidEncoding(format!("Invalid base64: {}", e)))?;
        if payload.len() < NONCE_SIZE {
            return Err(CryptoError::InvalidEncoding(format!(
                "Payload too short: {} bytes",
                payload.len()
            )));
        }

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| CryptoError::EncryptionFailed(format!("Failed to create cipher: {}", e)))?;

        let (nonce_bytes, ciphertext) = payload.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| CryptoError::DecryptionFailed)?;

        String::from_utf8(plaintext)
            .map_err(|e| CryptoError::InvalidEncoding(format!("Invalid UTF-8: {}", e)))
    }

    /// Encrypt a monetary amount, rendered with two decimal places.
    pub fn encrypt_amount(&self, amount: Decimal) -> CryptoResult<String> {
        self.encrypt_value(&format!("{:.2}", amount))
    }

    /// Decrypt a monetary amount.
    ///
    /// A stored value that decrypts but does not parse as a number is
    /// read as zero rather than poisoning the whole sheet.
    pub fn decrypt_amount(&self, stored: &str) -> CryptoResult<Decimal> {
        let plaintext = self.decrypt_value(stored)?;
        Ok(plaintext.trim().parse().unwrap_or(Decimal::ZERO))
    }
}
